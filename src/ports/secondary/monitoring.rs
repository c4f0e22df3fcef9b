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

use crate::domain::{ApiError, HostItem, HostSummary};
use async_trait::async_trait;

/// Session token returned by the login call; valid for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Secondary port - Monitoring API client
///
/// This interface abstracts the token-based JSON-RPC monitoring API the
/// host inventory is read from.
#[async_trait]
pub trait MonitoringApi: Send + Sync {
    /// Log in and obtain a session token
    ///
    /// # Arguments
    /// * `user` - API user name
    /// * `password` - API password
    ///
    /// # Returns
    /// * `Ok(SessionToken)` - Token for subsequent calls
    /// * `Err(ApiError::Auth)` - Rejected credentials, missing result, or transport failure
    async fn authenticate(&self, user: &str, password: &str) -> Result<SessionToken, ApiError>;

    /// List all hosts with the address of their first interface
    ///
    /// # Returns
    /// * `Ok(Vec<HostSummary>)` - Hosts in listing order
    /// * `Err(ApiError::Transport)` - Network failure
    /// * `Err(ApiError::Protocol)` - Unexpected response shape
    async fn list_hosts(&self, token: &SessionToken) -> Result<Vec<HostSummary>, ApiError>;

    /// Fetch the named telemetry items of one host
    ///
    /// # Returns
    /// * `Ok(Vec<HostItem>)` - Matching items; empty when the host has none
    /// * `Err(ApiError)` - Transport or protocol failure
    async fn get_host_items(
        &self,
        token: &SessionToken,
        host_id: &str,
    ) -> Result<Vec<HostItem>, ApiError>;
}
