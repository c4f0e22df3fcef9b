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

use std::net::IpAddr;
use thiserror::Error;

/// Domain-level errors that don't expose infrastructure details
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    /// Data parsing failed
    #[error("Data parsing failed: {0}")]
    ParsingFailed(String),
    /// The vendor OID table could not be read or decoded
    #[error("OID table unavailable: {0}")]
    OidTableUnavailable(String),
}

/// Errors raised by the monitoring API client
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Bad credentials or a malformed login response
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// Network unreachable, connection refused or timeout
    #[error("Network operation failed: {0}")]
    Transport(String),
    /// Response did not have the expected shape
    #[error("Unexpected API response: {0}")]
    Protocol(String),
}

/// Per-host probe errors; never fatal to a run
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProbeError {
    /// No usable response within the timeout
    #[error("{ip} did not respond: {reason}")]
    Unreachable { ip: IpAddr, reason: String },
    /// The exchange failed for another reason
    #[error("probe of {ip} failed: {reason}")]
    Failed { ip: IpAddr, reason: String },
    /// The requested OID is not valid dotted notation
    #[error("invalid OID '{0}'")]
    InvalidOid(String),
}

impl ProbeError {
    /// IP of the host the error refers to, if any
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            ProbeError::Unreachable { ip, .. } | ProbeError::Failed { ip, .. } => Some(*ip),
            ProbeError::InvalidOid(_) => None,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A required setting is absent or empty
    #[error("Missing required setting: {0}")]
    Missing(String),
    /// A setting is present but cannot be used
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Run-level error; anything surfacing here aborts the run
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_converts_into_inventory_error() {
        let err: InventoryError = ApiError::Auth("no result field".to_string()).into();
        assert!(matches!(err, InventoryError::Api(ApiError::Auth(_))));
        assert_eq!(err.to_string(), "Authentication failed: no result field");
    }

    #[test]
    fn test_inventory_error_only_wraps_setup_failures() {
        let errors: Vec<InventoryError> = vec![
            ConfigError::Missing("NETS".to_string()).into(),
            ApiError::Transport("refused".to_string()).into(),
            DomainError::OidTableUnavailable("missing".to_string()).into(),
        ];
        for err in errors {
            match err {
                InventoryError::Config(_) | InventoryError::Api(_) | InventoryError::Domain(_) => {}
            }
        }
    }

    #[test]
    fn test_probe_error_ip() {
        let ip: IpAddr = "10.0.0.5".parse().unwrap();
        let err = ProbeError::Unreachable {
            ip,
            reason: "timeout".to_string(),
        };
        assert_eq!(err.ip(), Some(ip));
        assert_eq!(ProbeError::InvalidOid("x".to_string()).ip(), None);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Missing("ZABBIX_URL".to_string());
        assert_eq!(err.to_string(), "Missing required setting: ZABBIX_URL");
    }
}
