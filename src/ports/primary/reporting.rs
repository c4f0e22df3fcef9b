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

use crate::domain::{HostItemsReport, InventoryError, InventoryReport};
use async_trait::async_trait;

/// Primary port - Main interface offered by the inventory domain
///
/// This is what external systems (CLI, library consumers) use to run a
/// polling pass.
#[async_trait]
pub trait InventoryReportingService: Send + Sync {
    /// Poll every filtered host over SNMP and merge the answers
    ///
    /// # Returns
    /// * `Ok(InventoryReport)` - Responding hosts plus the unreachable list
    /// * `Err(InventoryError)` - Setup failed (configuration, login, host listing, OID table)
    async fn collect_inventory(&self) -> Result<InventoryReport, InventoryError>;

    /// Fetch the monitoring API telemetry items of every filtered host
    ///
    /// Hosts without matching items are left out.
    ///
    /// # Returns
    /// * `Ok(Vec<HostItemsReport>)` - One entry per host with items
    /// * `Err(InventoryError)` - Setup failed
    async fn collect_host_items(&self) -> Result<Vec<HostItemsReport>, InventoryError>;
}
