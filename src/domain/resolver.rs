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

//! Manufacturer resolution from sysObjectID responses

use crate::domain::cache::ResolutionCache;
use crate::domain::parsers::{extract_oid_prefix, normalize_oid_key};
use crate::domain::{DomainError, Manufacturer, ManufacturerMatch};
use std::collections::HashMap;

/// Static mapping from enterprise OID prefix to manufacturer name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OidTable {
    entries: HashMap<String, String>,
}

impl OidTable {
    /// Build a table, normalizing keys to the leading-dot form
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(oid, name)| (normalize_oid_key(&oid), name))
                .collect(),
        }
    }

    /// Decode a JSON object of `{"<oid prefix>": "<manufacturer>"}`
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let entries: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| DomainError::OidTableUnavailable(format!("invalid OID table: {e}")))?;
        Ok(Self::new(entries))
    }

    pub fn get(&self, oid_prefix: &str) -> Option<&str> {
        self.entries.get(oid_prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves raw probe text to a manufacturer through a bounded cache
pub struct ManufacturerResolver {
    table: OidTable,
    cache: ResolutionCache<String, ManufacturerMatch>,
}

impl ManufacturerResolver {
    pub fn new(table: OidTable, cache: ResolutionCache<String, ManufacturerMatch>) -> Self {
        Self { table, cache }
    }

    /// Resolve a raw sysObjectID response
    ///
    /// Unknown or unparsable prefixes give `Manufacturer::Unknown`.
    pub fn resolve(&mut self, raw_response: &str) -> ManufacturerMatch {
        let table = &self.table;
        self.cache
            .get_or_insert_with(&raw_response.to_string(), || lookup(table, raw_response))
    }

    pub fn table(&self) -> &OidTable {
        &self.table
    }

    pub fn cache(&self) -> &ResolutionCache<String, ManufacturerMatch> {
        &self.cache
    }
}

fn lookup(table: &OidTable, raw_response: &str) -> ManufacturerMatch {
    let oid_prefix = extract_oid_prefix(raw_response);
    let manufacturer = oid_prefix
        .as_deref()
        .and_then(|prefix| table.get(prefix))
        .map(|name| Manufacturer::Known(name.to_string()))
        .unwrap_or(Manufacturer::Unknown);

    ManufacturerMatch {
        oid_prefix,
        manufacturer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ManufacturerResolver {
        let table = OidTable::from_json(r#"{"1.3.6.1.4.1.11": "HPE", ".1.3.6.1.4.1.9": "Cisco"}"#)
            .unwrap();
        ManufacturerResolver::new(table, ResolutionCache::new(8))
    }

    #[test]
    fn test_resolve_known_prefix() {
        let mut resolver = resolver();
        let found = resolver.resolve("sysObjectID.0 = 1.3.6.1.4.1.11.2.3.7.11.36");
        assert_eq!(found.oid_prefix.as_deref(), Some(".1.3.6.1.4.1.11"));
        assert_eq!(found.manufacturer, Manufacturer::Known("HPE".to_string()));
    }

    #[test]
    fn test_unknown_prefix_is_explicit_marker() {
        let mut resolver = resolver();
        let found = resolver.resolve("sysObjectID.0 = 1.3.6.1.4.1.99999.1");
        assert_eq!(found.oid_prefix.as_deref(), Some(".1.3.6.1.4.1.99999"));
        assert_eq!(found.manufacturer, Manufacturer::Unknown);

        let garbage = resolver.resolve("sysObjectID.0 = not an oid");
        assert_eq!(garbage.oid_prefix, None);
        assert_eq!(garbage.manufacturer, Manufacturer::Unknown);
    }

    #[test]
    fn test_repeated_lookups_hit_cache() {
        let mut resolver = resolver();
        let raw = "sysObjectID.0 = 1.3.6.1.4.1.9.1.2066";
        let first = resolver.resolve(raw);
        let second = resolver.resolve(raw);
        assert_eq!(first, second);
        assert_eq!(resolver.cache().stats(), (1, 1));
    }

    #[test]
    fn test_invalid_table_json() {
        assert!(matches!(
            OidTable::from_json("[1, 2, 3]"),
            Err(DomainError::OidTableUnavailable(_))
        ));
    }
}
