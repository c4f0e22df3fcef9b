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

//! Inventory Poller Library
//!
//! This library builds a network inventory by listing hosts from a Zabbix
//! monitoring API and probing every matching host over SNMPv2c, using a
//! Ports and Adapters (Hexagonal) architecture.
//!
//! # Architecture
//!
//! - **Domain**: Entities, parsing, filtering and the collection services
//! - **Ports**: Interfaces for the monitoring API, the prober and configuration
//! - **Adapters**: Zabbix JSON-RPC, SNMP and environment implementations
//!
//! # Usage
//!
//! ```rust,no_run
//! use inventory_poller::domain::presentation::render_report;
//! use inventory_poller::InventoryReportingService;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads ZABBIX_URL, ZABBIX_USER, ZABBIX_PASSWORD, SNMP_COMMUNITY and NETS
//!     let service = inventory_poller::create_service()?;
//!
//!     let report = service.collect_inventory().await?;
//!     println!("{}", render_report(&report));
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod container;
pub mod domain;
pub mod ports;

pub use adapters::{
    EnvConfigurationProvider, JsonOidTableRepository, SnmpDeviceProber, ZabbixApiClient,
};
pub use container::{ContainerConfig, ContainerConfigBuilder, ServiceContainer};
pub use domain::{
    HostRecord, HostItemsReport, InventoryError, InventoryReport, PollConfig, VendorDetails,
};
pub use ports::{
    ConfigurationProvider, DeviceProber, InventoryReportingService, MonitoringApi,
    OidTableRepository,
};

use std::sync::Arc;

/// Create an inventory reporting service configured from the environment
///
/// # Returns
/// * `Ok(Arc<dyn InventoryReportingService>)` - Configured service ready to use
/// * `Err(InventoryError)` - A required variable is missing or invalid
pub fn create_service() -> Result<Arc<dyn InventoryReportingService>, InventoryError> {
    create_service_with_config(ContainerConfig::default())
}

/// Create an inventory reporting service with custom container configuration
///
/// # Arguments
/// * `container_config` - Container configuration for customizing behavior
pub fn create_service_with_config(
    container_config: ContainerConfig,
) -> Result<Arc<dyn InventoryReportingService>, InventoryError> {
    let container = ServiceContainer::new(container_config);
    let provider = container.create_configuration_provider();
    container.create_inventory_service(provider.as_ref())
}
