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

//! Vendor OID table loaded from JSON

use crate::domain::{DomainError, OidTable};
use crate::ports::OidTableRepository;
use log::debug;
use std::path::PathBuf;

/// Table shipped with the binary
pub const BUNDLED_OID_TABLE: &str = include_str!("../../../../data/oid_manufacturer.json");

/// Where the table is read from
#[derive(Debug, Clone, PartialEq)]
pub enum OidTableSource {
    Bundled,
    File(PathBuf),
}

/// OID table repository backed by a JSON document
pub struct JsonOidTableRepository {
    source: OidTableSource,
}

impl JsonOidTableRepository {
    pub fn bundled() -> Self {
        Self {
            source: OidTableSource::Bundled,
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: OidTableSource::File(path.into()),
        }
    }

    pub fn source(&self) -> &OidTableSource {
        &self.source
    }
}

impl OidTableRepository for JsonOidTableRepository {
    fn load(&self) -> Result<OidTable, DomainError> {
        match &self.source {
            OidTableSource::Bundled => OidTable::from_json(BUNDLED_OID_TABLE),
            OidTableSource::File(path) => {
                debug!("Reading OID table from {}", path.display());
                let json = std::fs::read_to_string(path).map_err(|e| {
                    DomainError::OidTableUnavailable(format!("{}: {e}", path.display()))
                })?;
                OidTable::from_json(&json)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bundled_table_loads() {
        let table = JsonOidTableRepository::bundled().load().unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.get(".1.3.6.1.4.1.11"), Some("HPE"));
        assert_eq!(table.get(".1.3.6.1.4.1.9"), Some("Cisco"));
    }

    #[test]
    fn test_file_table_loads() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"1.3.6.1.4.1.99999": "Example Networks"}}"#).unwrap();

        let table = JsonOidTableRepository::from_file(file.path()).load().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(".1.3.6.1.4.1.99999"), Some("Example Networks"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonOidTableRepository::from_file(dir.path().join("absent.json")).load();
        assert!(matches!(result, Err(DomainError::OidTableUnavailable(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = JsonOidTableRepository::from_file(file.path()).load();
        assert!(matches!(result, Err(DomainError::OidTableUnavailable(_))));
    }
}
