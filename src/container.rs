/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Dependency injection container for inventory polling services

use crate::adapters::{
    EnvConfigurationProvider, JsonOidTableRepository, SnmpDeviceProber, ZabbixApiClient,
};
use crate::domain::{
    InventoryCollectionService, InventoryError, PollConfig, DEFAULT_CACHE_CAPACITY,
};
use crate::ports::{
    ConfigurationProvider, DeviceProber, InventoryReportingService, MonitoringApi,
    OidTableRepository,
};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the dependency injection container
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerConfig {
    /// Per-attempt SNMP response timeout
    pub probe_timeout: Duration,
    /// SNMP resends after a timeout
    pub retry_count: u32,
    /// HTTP timeout for monitoring API calls
    pub http_timeout: Duration,
    /// Skip TLS verification for the monitoring API
    pub skip_tls_verify: bool,
    /// Manufacturer resolver cache bound
    pub cache_capacity: usize,
    /// OID table file; the bundled table is used when unset
    pub oid_table_path: Option<PathBuf>,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(1),
            retry_count: 2,
            http_timeout: Duration::from_secs(30),
            skip_tls_verify: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            oid_table_path: None,
            verbose: false,
        }
    }
}

impl ContainerConfig {
    /// Default `env_logger` filter; `RUST_LOG` still takes precedence
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Dependency injection container
pub struct ServiceContainer {
    config: ContainerConfig,
}

impl ServiceContainer {
    /// Create a new service container with configuration
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    /// Create a service container with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ContainerConfig::default())
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Create the monitoring API client for the configured endpoint
    pub fn create_monitoring_api(
        &self,
        poll_config: &PollConfig,
    ) -> Result<Arc<dyn MonitoringApi>, InventoryError> {
        let client = ZabbixApiClient::new(
            &poll_config.api_url,
            self.config.http_timeout,
            self.config.skip_tls_verify,
        )?;
        Ok(Arc::new(client))
    }

    /// Create the SNMP prober for the configured community
    pub fn create_device_prober(&self, poll_config: &PollConfig) -> Arc<dyn DeviceProber> {
        Arc::new(SnmpDeviceProber::new(
            &poll_config.community,
            self.config.probe_timeout,
            self.config.retry_count,
        ))
    }

    /// Create the OID table repository
    pub fn create_oid_table_repository(&self) -> Arc<dyn OidTableRepository> {
        match &self.config.oid_table_path {
            Some(path) => Arc::new(JsonOidTableRepository::from_file(path.clone())),
            None => Arc::new(JsonOidTableRepository::bundled()),
        }
    }

    /// Create the environment-backed configuration provider
    pub fn create_configuration_provider(&self) -> Arc<dyn ConfigurationProvider> {
        Arc::new(EnvConfigurationProvider::new())
    }

    /// Create the complete inventory reporting service
    ///
    /// Configuration is read once from `provider`; the API client and the
    /// prober are built from it.
    pub fn create_inventory_service(
        &self,
        provider: &dyn ConfigurationProvider,
    ) -> Result<Arc<dyn InventoryReportingService>, InventoryError> {
        let poll_config = provider.get_poll_config()?;
        debug!(
            "Polling {} with {} network filter(s)",
            poll_config.api_url,
            poll_config.networks.len()
        );

        let api = self.create_monitoring_api(&poll_config)?;
        let prober = self.create_device_prober(&poll_config);
        let oid_tables = self.create_oid_table_repository();

        let service = InventoryCollectionService::new(
            api,
            prober,
            oid_tables,
            poll_config,
            self.config.cache_capacity,
        )?;

        Ok(Arc::new(service))
    }
}

/// Builder pattern for container configuration
pub struct ContainerConfigBuilder {
    config: ContainerConfig,
}

impl ContainerConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
        }
    }

    /// Set SNMP response timeout
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    /// Set SNMP retry count
    pub fn retry_count(mut self, count: u32) -> Self {
        self.config.retry_count = count;
        self
    }

    /// Set HTTP timeout
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// Skip TLS verification
    pub fn skip_tls_verify(mut self, skip: bool) -> Self {
        self.config.skip_tls_verify = skip;
        self
    }

    /// Set resolver cache capacity
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Read the OID table from a file instead of the bundled copy
    pub fn oid_table_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.oid_table_path = path;
        self
    }

    /// Enable verbose logging
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContainerConfig {
        self.config
    }
}

impl Default for ContainerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiError, ConfigError};
    use std::collections::HashMap;

    fn poll_config() -> PollConfig {
        PollConfig {
            api_url: "http://127.0.0.1/api_jsonrpc.php".to_string(),
            user: "admin".to_string(),
            password: "secret".to_string(),
            community: "public".to_string(),
            networks: vec!["10.0.0.0/8".to_string()],
        }
    }

    fn provider(pairs: &[(&str, &str)]) -> EnvConfigurationProvider {
        EnvConfigurationProvider::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_config_builder() {
        let config = ContainerConfigBuilder::new()
            .probe_timeout(Duration::from_millis(500))
            .retry_count(3)
            .cache_capacity(16)
            .oid_table_path(Some(PathBuf::from("/tmp/oids.json")))
            .verbose(true)
            .build();

        assert_eq!(config.probe_timeout, Duration::from_millis(500));
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.oid_table_path, Some(PathBuf::from("/tmp/oids.json")));
        assert!(config.verbose);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_verbose_raises_log_filter() {
        assert_eq!(ContainerConfig::default().log_filter(), "info");
        let verbose = ContainerConfigBuilder::new().verbose(true).build();
        assert_eq!(verbose.log_filter(), "debug");
    }

    #[test]
    fn test_monitoring_api_creation() {
        let container = ServiceContainer::with_defaults();
        assert!(container.create_monitoring_api(&poll_config()).is_ok());

        let mut config = poll_config();
        config.api_url = String::new();
        assert!(matches!(
            container.create_monitoring_api(&config),
            Err(InventoryError::Api(ApiError::Transport(_)))
        ));
    }

    #[test]
    fn test_bundled_table_by_default() {
        let container = ServiceContainer::with_defaults();
        let table = container.create_oid_table_repository().load().unwrap();
        assert!(!table.is_empty());
    }

    #[test]
    fn test_complete_service_creation() {
        let container = ServiceContainer::with_defaults();
        let env = provider(&[
            ("ZABBIX_URL", "https://zabbix.example/api_jsonrpc.php"),
            ("ZABBIX_USER", "admin"),
            ("ZABBIX_PASSWORD", "secret"),
            ("SNMP_COMMUNITY", "public"),
            ("NETS", "10.0.0.0/8"),
        ]);
        assert!(container.create_inventory_service(&env).is_ok());
    }

    #[test]
    fn test_service_creation_reports_missing_config() {
        let container = ServiceContainer::with_defaults();
        let result = container.create_inventory_service(&provider(&[]));
        assert!(matches!(
            result,
            Err(InventoryError::Config(ConfigError::Missing(_)))
        ));
    }
}
