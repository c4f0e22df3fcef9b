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

//! Configuration read from the process environment

use crate::domain::parsers::split_hyphen_list;
use crate::domain::{ConfigError, PollConfig};
use crate::ports::ConfigurationProvider;
use std::collections::HashMap;

pub const API_URL_VAR: &str = "ZABBIX_URL";
pub const USER_VAR: &str = "ZABBIX_USER";
pub const PASSWORD_VAR: &str = "ZABBIX_PASSWORD";
pub const COMMUNITY_VAR: &str = "SNMP_COMMUNITY";
pub const NETWORKS_VAR: &str = "NETS";

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads every setting from environment variables; nothing has a default
pub struct EnvConfigurationProvider {
    lookup: Lookup,
}

impl EnvConfigurationProvider {
    /// Read from the real process environment
    pub fn new() -> Self {
        Self {
            lookup: Box::new(|key| std::env::var(key).ok()),
        }
    }

    /// Read from a fixed map instead of the process environment
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self {
            lookup: Box::new(move |key| vars.get(key).cloned()),
        }
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        match (self.lookup)(key) {
            Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(ConfigError::Missing(key.to_string())),
        }
    }
}

impl Default for EnvConfigurationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationProvider for EnvConfigurationProvider {
    fn get_poll_config(&self) -> Result<PollConfig, ConfigError> {
        let api_url = self.required(API_URL_VAR)?;

        let networks = split_hyphen_list(&self.required(NETWORKS_VAR)?);
        if networks.is_empty() {
            return Err(ConfigError::Missing(NETWORKS_VAR.to_string()));
        }

        Ok(PollConfig {
            api_url,
            user: self.required(USER_VAR)?,
            password: self.required(PASSWORD_VAR)?,
            community: self.required(COMMUNITY_VAR)?,
            networks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete() -> HashMap<String, String> {
        vars(&[
            (API_URL_VAR, "https://zabbix.example/api_jsonrpc.php"),
            (USER_VAR, "admin"),
            (PASSWORD_VAR, "secret"),
            (COMMUNITY_VAR, "public"),
            (NETWORKS_VAR, "10.0.0.0/8-192.168.1."),
        ])
    }

    #[test]
    fn test_complete_environment() {
        let config = EnvConfigurationProvider::from_map(complete())
            .get_poll_config()
            .unwrap();
        assert_eq!(config.user, "admin");
        assert_eq!(config.community, "public");
        assert_eq!(config.networks, vec!["10.0.0.0/8", "192.168.1."]);
    }

    #[test]
    fn test_each_variable_is_required() {
        for key in [API_URL_VAR, USER_VAR, PASSWORD_VAR, COMMUNITY_VAR, NETWORKS_VAR] {
            let mut env = complete();
            env.remove(key);
            let err = EnvConfigurationProvider::from_map(env)
                .get_poll_config()
                .unwrap_err();
            assert_eq!(err, ConfigError::Missing(key.to_string()));
        }
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let mut env = complete();
        env.insert(PASSWORD_VAR.to_string(), "   ".to_string());
        let err = EnvConfigurationProvider::from_map(env)
            .get_poll_config()
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing(PASSWORD_VAR.to_string()));

        let mut env = complete();
        env.insert(NETWORKS_VAR.to_string(), "--".to_string());
        assert!(EnvConfigurationProvider::from_map(env)
            .get_poll_config()
            .is_err());
    }

    #[test]
    fn test_values_are_only_checked_for_presence() {
        let mut env = complete();
        env.insert(API_URL_VAR.to_string(), "zabbix.example".to_string());
        let config = EnvConfigurationProvider::from_map(env)
            .get_poll_config()
            .unwrap();
        assert_eq!(config.api_url, "zabbix.example");
    }
}
