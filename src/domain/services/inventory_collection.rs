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

use crate::domain::cache::ResolutionCache;
use crate::domain::parsers::VendorKind;
use crate::domain::services::fan_out::{FanOutCoordinator, FanOutOutcome, ProbeTarget};
use crate::domain::{
    ConfigError, HostItemsReport, HostRecord, HostSummary, InventoryError, InventoryReport,
    ManufacturerResolver, NetworkFilter, PollConfig,
};
use crate::ports::{
    DeviceProber, InventoryReportingService, MonitoringApi, OidTableRepository, SessionToken,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

/// Domain service that implements inventory collection
///
/// This service coordinates the monitoring API, the host filter and the
/// concurrent SNMP probes, and merges everything into one report.
pub struct InventoryCollectionService {
    /// Monitoring API client
    api: Arc<dyn MonitoringApi>,
    /// Per-host prober
    prober: Arc<dyn DeviceProber>,
    /// Vendor OID table source
    oid_tables: Arc<dyn OidTableRepository>,
    /// Credentials and network list
    config: PollConfig,
    filter: NetworkFilter,
    /// Entries kept by the manufacturer resolver cache
    cache_capacity: usize,
}

impl InventoryCollectionService {
    /// Create a new inventory collection service
    ///
    /// # Arguments
    /// * `api` - Monitoring API client
    /// * `prober` - Device prober used by the fan-out workers
    /// * `oid_tables` - Source of the vendor OID table
    /// * `config` - Polling configuration
    /// * `cache_capacity` - Resolver cache bound
    ///
    /// # Returns
    /// * `Err(ConfigError)` - The network list cannot be used
    pub fn new(
        api: Arc<dyn MonitoringApi>,
        prober: Arc<dyn DeviceProber>,
        oid_tables: Arc<dyn OidTableRepository>,
        config: PollConfig,
        cache_capacity: usize,
    ) -> Result<Self, ConfigError> {
        let filter = NetworkFilter::new(&config.networks)?;
        Ok(Self {
            api,
            prober,
            oid_tables,
            config,
            filter,
            cache_capacity,
        })
    }

    /// Log in, list hosts and apply the network filter
    async fn filtered_hosts(&self) -> Result<(SessionToken, Vec<HostSummary>), InventoryError> {
        info!("Authenticating against {}", self.config.api_url);
        let token = self
            .api
            .authenticate(&self.config.user, &self.config.password)
            .await?;

        info!("Getting hosts from the monitoring API");
        let hosts = self.api.list_hosts(&token).await?;
        let listed = hosts.len();
        let hosts = self.filter.apply(hosts);
        info!("{} of {} hosts match the configured networks", hosts.len(), listed);

        Ok((token, hosts))
    }

    /// Turn raw probe answers into inventory records
    fn build_report(&self, resolver: &mut ManufacturerResolver, outcome: FanOutOutcome) -> InventoryReport {
        let hosts = outcome
            .responses
            .into_iter()
            .map(|(ip, response)| {
                let found = resolver.resolve(&response.object_id);
                let mut record = HostRecord::new(ip, response.name);
                record.manufacturer = found.manufacturer.name().map(str::to_string);
                record.oid = found.oid_prefix;

                if let Some(description) = response.description {
                    let kind = VendorKind::classify(&description);
                    record.extra_oids = kind.extra_oids();
                    match kind.extract(&description) {
                        Ok(details) => record.details = Some(details),
                        Err(e) => debug!("Keeping raw description for {}: {}", ip, e),
                    }
                    record.description = Some(description);
                }

                (ip, record)
            })
            .collect();

        InventoryReport {
            hosts,
            unreachable: outcome.unreachable,
        }
    }
}

#[async_trait]
impl InventoryReportingService for InventoryCollectionService {
    async fn collect_inventory(&self) -> Result<InventoryReport, InventoryError> {
        info!("Reading vendor OID table");
        let table = self.oid_tables.load()?;
        debug!("OID table holds {} prefixes", table.len());
        let mut resolver =
            ManufacturerResolver::new(table, ResolutionCache::new(self.cache_capacity));

        let (_token, hosts) = self.filtered_hosts().await?;

        info!("Getting additional data with SNMP");
        let targets = hosts
            .into_iter()
            .filter_map(|host| {
                host.ip.map(|ip| ProbeTarget {
                    ip,
                    name: host.name,
                })
            })
            .collect();
        let outcome = FanOutCoordinator::new(Arc::clone(&self.prober))
            .probe_all(targets)
            .await;

        Ok(self.build_report(&mut resolver, outcome))
    }

    async fn collect_host_items(&self) -> Result<Vec<HostItemsReport>, InventoryError> {
        let (token, hosts) = self.filtered_hosts().await?;

        let mut reports = Vec::new();
        for host in hosts {
            match self.api.get_host_items(&token, &host.host_id).await {
                Ok(items) if items.is_empty() => {
                    debug!("Host {} has no matching items", host.name);
                }
                Ok(items) => reports.push(HostItemsReport { host, items }),
                Err(e) => warn!("Skipping items of {}: {}", host.name, e),
            }
        }

        Ok(reports)
    }
}
