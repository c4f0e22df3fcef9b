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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

/// SNMP sysObjectID.0, used to identify the manufacturer
pub const SYS_OBJECT_ID_OID: &str = ".1.3.6.1.2.1.1.2.0";

/// SNMP sysDescr.0, the free-form device description
pub const SYS_DESCR_OID: &str = ".1.3.6.1.2.1.1.1.0";

/// A host as returned by the monitoring API host listing
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HostSummary {
    /// Monitoring API host identifier
    pub host_id: String,
    /// Display name
    pub name: String,
    /// Address of the first network interface
    pub ip: Option<IpAddr>,
}

/// A telemetry item attached to a host
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HostItem {
    pub item_id: String,
    pub name: String,
    pub last_value: String,
}

/// Manufacturer inferred from the sysObjectID prefix
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub enum Manufacturer {
    /// Prefix found in the OID table
    Known(String),
    /// Prefix absent from the table or unparsable
    Unknown,
}

impl Manufacturer {
    pub fn name(&self) -> Option<&str> {
        match self {
            Manufacturer::Known(name) => Some(name),
            Manufacturer::Unknown => None,
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Manufacturer::Known(name) => write!(f, "{name}"),
            Manufacturer::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of resolving a raw manufacturer probe response
#[derive(Debug, Clone, PartialEq)]
pub struct ManufacturerMatch {
    /// Seven-segment OID prefix, e.g. `.1.3.6.1.4.1.11`
    pub oid_prefix: Option<String>,
    pub manufacturer: Manufacturer,
}

/// Normalized fields pulled out of a vendor description string
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VendorDetails {
    /// Device model or name
    pub device: String,
    /// Software or firmware version
    pub version: Option<String>,
    /// Operating system banner
    pub os: Option<String>,
}

impl VendorDetails {
    pub fn new(device: impl Into<String>, version: Option<String>, os: Option<String>) -> Self {
        Self {
            device: device.into(),
            version,
            os,
        }
    }
}

/// Inventory entry for one host, keyed by IP
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HostRecord {
    pub ip: IpAddr,
    pub name: String,
    /// Manufacturer name; `None` when the prefix is not in the OID table
    pub manufacturer: Option<String>,
    /// Seven-segment sysObjectID prefix
    pub oid: Option<String>,
    /// Vendor-specific follow-up OIDs, when the vendor is recognized
    pub extra_oids: Option<Vec<String>>,
    /// Raw sysDescr text
    pub description: Option<String>,
    /// Fields normalized from the description
    pub details: Option<VendorDetails>,
}

impl HostRecord {
    /// Create a record for a host that has not been probed yet
    pub fn new(ip: IpAddr, name: impl Into<String>) -> Self {
        Self {
            ip,
            name: name.into(),
            manufacturer: None,
            oid: None,
            extra_oids: None,
            description: None,
            details: None,
        }
    }
}

/// Merged outcome of a polling run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryReport {
    /// Hosts that answered the manufacturer probe
    pub hosts: HashMap<IpAddr, HostRecord>,
    /// Hosts that did not; order is not meaningful
    pub unreachable: Vec<IpAddr>,
}

impl InventoryReport {
    /// Number of hosts that were probed
    pub fn probed(&self) -> usize {
        self.hosts.len() + self.unreachable.len()
    }
}

/// Items collected for one host
#[derive(Debug, Clone, PartialEq)]
pub struct HostItemsReport {
    pub host: HostSummary,
    pub items: Vec<HostItem>,
}

/// Settings consumed by the collection service
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// JSON-RPC endpoint
    pub api_url: String,
    pub user: String,
    pub password: String,
    /// SNMPv2c community string
    pub community: String,
    /// Raw network filter entries (CIDR blocks or address prefixes)
    pub networks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manufacturer_display() {
        assert_eq!(Manufacturer::Known("HPE".to_string()).to_string(), "HPE");
        assert_eq!(Manufacturer::Unknown.to_string(), "unknown");
        assert_eq!(Manufacturer::Unknown.name(), None);
    }

    #[test]
    fn test_report_probed_count() {
        let ip: IpAddr = "10.0.0.2".parse().unwrap();
        let mut report = InventoryReport::default();
        report.hosts.insert(ip, HostRecord::new(ip, "sw-01"));
        report.unreachable.push("10.0.0.5".parse().unwrap());
        assert_eq!(report.probed(), 2);
    }
}
