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

//! Zabbix JSON-RPC client

use crate::domain::parsers::{parse_host_list, parse_item_list, parse_login_response};
use crate::domain::{ApiError, HostItem, HostSummary};
use crate::ports::{MonitoringApi, SessionToken};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Item names searched by `item.get`
pub const ITEM_NAME_SEARCH: &[&str] = &["CPU", "Memory", "Disk", "Software"];

/// Build a `user.login` request
pub fn login_payload(user: &str, password: &str, id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "user.login",
        "params": {
            "user": user,
            "password": password,
        },
        "id": id,
    })
}

/// Build a `host.get` request selecting interface addresses
pub fn host_list_payload(token: &str, id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "host.get",
        "params": {
            "output": ["hostid", "host", "name"],
            "selectInterfaces": ["ip"],
        },
        "auth": token,
        "id": id,
    })
}

/// Build an `item.get` request for one host
pub fn host_items_payload(token: &str, host_id: &str, id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "item.get",
        "params": {
            "output": ["itemid", "name", "lastvalue"],
            "hostids": host_id,
            "search": {
                "name": ITEM_NAME_SEARCH,
            },
            "searchByAny": true,
        },
        "auth": token,
        "id": id,
    })
}

/// Monitoring API client speaking Zabbix JSON-RPC over HTTP
pub struct ZabbixApiClient {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl ZabbixApiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `endpoint` - JSON-RPC URL, e.g. `https://zabbix.example/api_jsonrpc.php`
    /// * `timeout` - HTTP request timeout
    /// * `skip_tls_verify` - Whether to skip TLS certificate verification
    pub fn new(endpoint: &str, timeout: Duration, skip_tls_verify: bool) -> Result<Self, ApiError> {
        if endpoint.trim().is_empty() {
            return Err(ApiError::Transport("No endpoint URL provided".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(skip_tls_verify)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim().to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Create with default settings
    pub fn with_defaults(endpoint: &str) -> Result<Self, ApiError> {
        Self::new(endpoint, Duration::from_secs(30), false)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Send one JSON-RPC request and decode the JSON body
    async fn call(&self, payload: &Value) -> Result<Value, ApiError> {
        debug!(
            "JSON-RPC {} -> {}",
            payload["method"].as_str().unwrap_or("?"),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return if status.as_u16() == 401 || status.as_u16() == 403 {
                Err(ApiError::Auth(format!("HTTP {status}: {error_text}")))
            } else {
                Err(ApiError::Transport(format!("HTTP {status}: {error_text}")))
            };
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Protocol(format!("Response is not valid JSON: {e}")))
    }
}

#[async_trait]
impl MonitoringApi for ZabbixApiClient {
    async fn authenticate(&self, user: &str, password: &str) -> Result<SessionToken, ApiError> {
        let payload = login_payload(user, password, self.request_id());
        let response = self.call(&payload).await.map_err(|e| match e {
            ApiError::Auth(msg) => ApiError::Auth(msg),
            other => ApiError::Auth(format!("login request failed: {other}")),
        })?;
        parse_login_response(&response).map(SessionToken)
    }

    async fn list_hosts(&self, token: &SessionToken) -> Result<Vec<HostSummary>, ApiError> {
        let payload = host_list_payload(token.as_str(), self.request_id());
        let response = self.call(&payload).await?;
        parse_host_list(&response)
    }

    async fn get_host_items(
        &self,
        token: &SessionToken,
        host_id: &str,
    ) -> Result<Vec<HostItem>, ApiError> {
        let payload = host_items_payload(token.as_str(), host_id, self.request_id());
        let response = self.call(&payload).await?;
        parse_item_list(&response)
    }
}
