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

//! OID prefix extraction from raw sysObjectID responses

use super::common::probe_value;

/// Number of leading segments that identify an enterprise (`1.3.6.1.4.1.<n>`)
pub const MANUFACTURER_PREFIX_SEGMENTS: usize = 7;

/// Extract the manufacturer OID prefix from a raw probe response
///
/// Takes the value after the last `=`, keeps the first seven numeric
/// segments and renders them with a leading dot.
///
/// # Arguments
/// * `raw` - Probe text such as `"sysObjectID.0 = 1.3.6.1.4.1.11.2.3.7.11"`
///
/// # Returns
/// * `Some(String)` - Prefix such as `.1.3.6.1.4.1.11`
/// * `None` - The value is not a dotted numeric OID
pub fn extract_oid_prefix(raw: &str) -> Option<String> {
    let value = probe_value(raw);
    let value = value.strip_prefix('.').unwrap_or(value);
    if value.is_empty() {
        return None;
    }

    let segments: Vec<&str> = value.split('.').collect();
    if segments
        .iter()
        .any(|s| s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let prefix: Vec<&str> = segments
        .into_iter()
        .take(MANUFACTURER_PREFIX_SEGMENTS)
        .collect();
    Some(format!(".{}", prefix.join(".")))
}

/// Normalize an OID table key to the leading-dot form
pub fn normalize_oid_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with('.') {
        key.to_string()
    } else {
        format!(".{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_oid_prefix_from_probe_text() {
        assert_eq!(
            extract_oid_prefix("SNMPv2-MIB::sysObjectID.0 = 1.3.6.1.4.1.11.2.3.7.11.36"),
            Some(".1.3.6.1.4.1.11".to_string())
        );
    }

    #[test]
    fn test_extract_oid_prefix_leading_dot_and_short_values() {
        assert_eq!(
            extract_oid_prefix(".1.3.6.1.4.1.25053.3.1.4.99"),
            Some(".1.3.6.1.4.1.25053".to_string())
        );
        // Shorter than seven segments is kept as-is
        assert_eq!(extract_oid_prefix("1.3.6.1"), Some(".1.3.6.1".to_string()));
    }

    #[test]
    fn test_extract_oid_prefix_rejects_non_numeric() {
        assert_eq!(extract_oid_prefix("sysObjectID.0 = noSuchObject"), None);
        assert_eq!(extract_oid_prefix("sysObjectID.0 = "), None);
        assert_eq!(extract_oid_prefix("1.3..6"), None);
    }

    #[test]
    fn test_extract_oid_prefix_is_deterministic() {
        let raw = "sysObjectID.0 = 1.3.6.1.4.1.9.1.2066";
        let first = extract_oid_prefix(raw);
        for _ in 0..10 {
            assert_eq!(extract_oid_prefix(raw), first);
        }
    }

    #[test]
    fn test_normalize_oid_key() {
        assert_eq!(normalize_oid_key("1.3.6.1.4.1.9"), ".1.3.6.1.4.1.9");
        assert_eq!(normalize_oid_key(" .1.3.6.1.4.1.9 "), ".1.3.6.1.4.1.9");
    }
}
