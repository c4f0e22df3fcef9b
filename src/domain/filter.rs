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

//! Network filter applied to the monitoring API host list

use crate::domain::{ConfigError, HostSummary};
use ipnetwork::IpNetwork;
use log::{debug, warn};
use std::collections::HashSet;
use std::net::IpAddr;

/// One entry of the configured network list
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkMatcher {
    /// CIDR block such as `10.0.0.0/8`
    Cidr(IpNetwork),
    /// Textual address prefix such as `192.168.1.`
    Prefix(String),
}

impl NetworkMatcher {
    /// Parse an entry; anything containing `/` must be a valid CIDR block
    pub fn parse(entry: &str) -> Result<Self, ConfigError> {
        let entry = entry.trim();
        if entry.contains('/') {
            entry
                .parse::<IpNetwork>()
                .map(NetworkMatcher::Cidr)
                .map_err(|e| ConfigError::Invalid {
                    key: "NETS".to_string(),
                    reason: format!("'{entry}' is not a valid network: {e}"),
                })
        } else {
            Ok(NetworkMatcher::Prefix(entry.to_string()))
        }
    }

    pub fn matches(&self, ip: IpAddr) -> bool {
        match self {
            NetworkMatcher::Cidr(network) => network.contains(ip),
            NetworkMatcher::Prefix(prefix) => ip.to_string().starts_with(prefix.as_str()),
        }
    }
}

/// Keeps hosts whose IP falls inside at least one configured network
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkFilter {
    matchers: Vec<NetworkMatcher>,
}

impl NetworkFilter {
    /// Build a filter from raw entries; an empty list is rejected
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Result<Self, ConfigError> {
        let matchers = entries
            .iter()
            .map(|entry| entry.as_ref())
            .filter(|entry| !entry.trim().is_empty())
            .map(NetworkMatcher::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if matchers.is_empty() {
            return Err(ConfigError::Missing("NETS".to_string()));
        }

        Ok(Self { matchers })
    }

    pub fn matches(&self, ip: IpAddr) -> bool {
        self.matchers.iter().any(|m| m.matches(ip))
    }

    /// Keep matching hosts, in listing order
    ///
    /// Hosts without an address are dropped, as are later hosts repeating an
    /// address already kept.
    pub fn apply(&self, hosts: Vec<HostSummary>) -> Vec<HostSummary> {
        let mut seen = HashSet::new();
        hosts
            .into_iter()
            .filter(|host| {
                let Some(ip) = host.ip else {
                    debug!("Skipping host {} without an interface address", host.name);
                    return false;
                };
                if !self.matches(ip) {
                    return false;
                }
                if !seen.insert(ip) {
                    warn!("Skipping host {}: address {} already listed", host.name, ip);
                    return false;
                }
                true
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(id: &str, ip: Option<&str>) -> HostSummary {
        HostSummary {
            host_id: id.to_string(),
            name: format!("host-{id}"),
            ip: ip.map(|ip| ip.parse().unwrap()),
        }
    }

    #[test]
    fn test_cidr_and_prefix_entries() {
        let filter = NetworkFilter::new(&["10.0.0.0/8", "192.168.1."]).unwrap();
        assert!(filter.matches("10.20.30.40".parse().unwrap()));
        assert!(filter.matches("192.168.1.77".parse().unwrap()));
        assert!(!filter.matches("192.168.10.1".parse().unwrap()));
        assert!(!filter.matches("172.16.0.1".parse().unwrap()));
    }

    #[test]
    fn test_invalid_cidr_is_config_error() {
        let result = NetworkFilter::new(&["10.0.0.0/40"]);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_empty_filter_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            NetworkFilter::new(&empty),
            Err(ConfigError::Missing(_))
        ));
        assert!(NetworkFilter::new(&["  "]).is_err());
    }

    #[test]
    fn test_apply_drops_unmatched_missing_and_duplicate_hosts() {
        let filter = NetworkFilter::new(&["10.0.0.0/24"]).unwrap();
        let hosts = vec![
            host("1", Some("10.0.0.5")),
            host("2", Some("172.16.0.9")),
            host("3", None),
            host("4", Some("10.0.0.2")),
            host("5", Some("10.0.0.5")),
        ];

        let kept = filter.apply(hosts);
        let ids: Vec<&str> = kept.iter().map(|h| h.host_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }
}
