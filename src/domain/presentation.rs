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

//! Text rendering of inventory results

use crate::domain::{HostItemsReport, HostRecord, InventoryReport, Manufacturer};
use std::collections::HashMap;
use std::fmt::Write;
use std::net::IpAddr;

/// Order records by numeric IP value (IPv4 before IPv6)
pub fn sort_by_ip(hosts: &HashMap<IpAddr, HostRecord>) -> Vec<&HostRecord> {
    let mut ordered: Vec<&HostRecord> = hosts.values().collect();
    sort_records(&mut ordered);
    ordered
}

/// Sort an already collected sequence in place; sorting twice is a no-op
pub fn sort_records(records: &mut [&HostRecord]) {
    records.sort_by_key(|record| record.ip);
}

/// Render one line per host, followed by indented details when present
pub fn render(records: &[&HostRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{} -> {{name: \"{}\", manufacturer: {}, oid: {}}}",
            record.ip,
            record.name,
            manufacturer(record.manufacturer.as_deref()),
            quoted(record.oid.as_deref()),
        );
        if let Some(details) = &record.details {
            let _ = writeln!(out, "    device: {}", details.device);
            if let Some(version) = &details.version {
                let _ = writeln!(out, "    version: {version}");
            }
            if let Some(os) = &details.os {
                let _ = writeln!(out, "    os: {os}");
            }
        } else if let Some(description) = &record.description {
            let _ = writeln!(out, "    description: {}", description.replace('\n', " | "));
        }
        if let Some(extra) = &record.extra_oids {
            let _ = writeln!(out, "    extra oids: {}", extra.join(", "));
        }
    }
    out
}

/// Render a full report with a heading and a totals line
pub fn render_report(report: &InventoryReport) -> String {
    let ordered = sort_by_ip(&report.hosts);
    let mut out = String::from("Inventory Summary:\n==================\n");
    out.push_str(&render(&ordered));
    let _ = writeln!(
        out,
        "\n{} of {} hosts responded",
        report.hosts.len(),
        report.probed()
    );
    out
}

/// Render the per-host telemetry item listing
pub fn render_items(reports: &[HostItemsReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(
            out,
            "\nHost: {} (ID: {})",
            report.host.name, report.host.host_id
        );
        for item in &report.items {
            let _ = writeln!(out, "  - {}: {}", item.name, item.last_value);
        }
    }
    out
}

// Every rendered host answered the manufacturer probe, so a missing name
// means the resolver found no table entry.
fn manufacturer(name: Option<&str>) -> String {
    match name {
        Some(_) => quoted(name),
        None => Manufacturer::Unknown.to_string(),
    }
}

fn quoted(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("\"{v}\""),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HostItem, HostSummary, VendorDetails};

    fn record(ip: &str, name: &str) -> HostRecord {
        HostRecord::new(ip.parse().unwrap(), name)
    }

    fn mapping(ips: &[&str]) -> HashMap<IpAddr, HostRecord> {
        ips.iter()
            .map(|ip| (ip.parse().unwrap(), record(ip, ip)))
            .collect()
    }

    #[test]
    fn test_sort_is_numeric_not_lexicographic() {
        let hosts = mapping(&["10.0.0.10", "10.0.0.9", "10.0.0.100", "2.1.1.1"]);
        let ordered: Vec<String> = sort_by_ip(&hosts)
            .iter()
            .map(|r| r.ip.to_string())
            .collect();
        assert_eq!(ordered, vec!["2.1.1.1", "10.0.0.9", "10.0.0.10", "10.0.0.100"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let hosts = mapping(&["192.168.1.20", "10.1.0.1", "192.168.1.3", "fe80::1"]);
        let mut once = sort_by_ip(&hosts);
        let first: Vec<IpAddr> = once.iter().map(|r| r.ip).collect();
        sort_records(&mut once);
        let second: Vec<IpAddr> = once.iter().map(|r| r.ip).collect();
        assert_eq!(first, second);
        assert_eq!(first.last().unwrap().to_string(), "fe80::1");
    }

    #[test]
    fn test_render_line() {
        let mut hpe = record("10.0.0.2", "core-sw-01");
        hpe.manufacturer = Some("HPE".to_string());
        hpe.oid = Some(".1.3.6.1.4.1.11".to_string());
        hpe.details = Some(VendorDetails::new("HP-2910al-24G", Some("W.14.49".to_string()), None));

        let text = render(&[&hpe]);
        assert!(text.starts_with(
            "10.0.0.2 -> {name: \"core-sw-01\", manufacturer: \"HPE\", oid: \".1.3.6.1.4.1.11\"}"
        ));
        assert!(text.contains("    device: HP-2910al-24G"));
        assert!(text.contains("    version: W.14.49"));
    }

    #[test]
    fn test_render_unknown_manufacturer() {
        let text = render(&[&record("10.0.0.3", "ap-01")]);
        assert_eq!(
            text,
            "10.0.0.3 -> {name: \"ap-01\", manufacturer: unknown, oid: none}\n"
        );
    }

    #[test]
    fn test_render_prefix_missing_from_table() {
        let mut unlisted = record("10.0.0.4", "gw");
        unlisted.oid = Some(".1.3.6.1.4.1.99999".to_string());
        let text = render(&[&unlisted]);
        assert_eq!(
            text,
            "10.0.0.4 -> {name: \"gw\", manufacturer: unknown, oid: \".1.3.6.1.4.1.99999\"}\n"
        );
    }

    #[test]
    fn test_render_items() {
        let reports = vec![HostItemsReport {
            host: HostSummary {
                host_id: "10084".to_string(),
                name: "core-sw-01".to_string(),
                ip: None,
            },
            items: vec![HostItem {
                item_id: "1".to_string(),
                name: "Software version".to_string(),
                last_value: "16.10".to_string(),
            }],
        }];
        assert_eq!(
            render_items(&reports),
            "\nHost: core-sw-01 (ID: 10084)\n  - Software version: 16.10\n"
        );
    }
}
