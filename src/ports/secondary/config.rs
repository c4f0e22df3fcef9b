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

use crate::domain::{ConfigError, OidTable, PollConfig};

/// Secondary port - Configuration provider abstraction
///
/// This interface abstracts where credentials and network filters come from
/// (process environment, files, tests).
pub trait ConfigurationProvider: Send + Sync {
    /// Load the polling configuration
    ///
    /// # Returns
    /// * `Ok(PollConfig)` - All required settings present
    /// * `Err(ConfigError)` - A setting is missing or unusable
    fn get_poll_config(&self) -> Result<PollConfig, ConfigError>;
}

/// Secondary port - Vendor OID table source
pub trait OidTableRepository: Send + Sync {
    /// Load the OID-prefix-to-manufacturer table
    ///
    /// # Returns
    /// * `Ok(OidTable)` - Decoded table
    /// * `Err(DomainError::OidTableUnavailable)` - Unreadable or malformed
    fn load(&self) -> Result<OidTable, crate::domain::DomainError>;
}
