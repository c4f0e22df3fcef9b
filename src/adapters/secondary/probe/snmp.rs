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

//! SNMPv2c prober

use crate::domain::ProbeError;
use crate::ports::DeviceProber;
use async_snmp::client::Retry;
use async_snmp::{Auth, Client, Oid, Value};
use async_trait::async_trait;
use log::debug;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Standard SNMP agent port
pub const SNMP_PORT: u16 = 161;

/// Prober issuing one SNMPv2c GET per call
pub struct SnmpDeviceProber {
    community: String,
    /// Time to wait for each response
    timeout: Duration,
    /// Transport-level resends after a timeout
    retries: u32,
    port: u16,
}

impl SnmpDeviceProber {
    /// Create a new SNMP prober
    ///
    /// # Arguments
    /// * `community` - SNMPv2c community string
    /// * `timeout` - Per-attempt response timeout
    /// * `retries` - Resends after a timeout
    pub fn new(community: &str, timeout: Duration, retries: u32) -> Self {
        Self {
            community: community.to_string(),
            timeout,
            retries,
            port: SNMP_PORT,
        }
    }

    /// Create with the defaults used by the CLI: 1s timeout, 2 retries
    pub fn with_defaults(community: &str) -> Self {
        Self::new(community, Duration::from_secs(1), 2)
    }

    /// Override the agent port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    fn target(&self, ip: IpAddr) -> String {
        SocketAddr::new(ip, self.port).to_string()
    }
}

/// Render a response value, treating SNMP exceptions as no answer
pub fn render_value(ip: IpAddr, oid: &Oid, value: &Value) -> Result<String, ProbeError> {
    let text = match value {
        Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView | Value::Null => {
            return Err(ProbeError::Unreachable {
                ip,
                reason: format!("empty response for {oid}: {value}"),
            });
        }
        other => other.to_string(),
    };

    if text.trim().is_empty() {
        return Err(ProbeError::Unreachable {
            ip,
            reason: format!("empty response for {oid}"),
        });
    }
    Ok(format!("{oid} = {text}"))
}

fn map_snmp_error(ip: IpAddr, error: Box<async_snmp::Error>) -> ProbeError {
    match *error {
        async_snmp::Error::Timeout { .. } => ProbeError::Unreachable {
            ip,
            reason: error.to_string(),
        },
        _ => ProbeError::Failed {
            ip,
            reason: error.to_string(),
        },
    }
}

#[async_trait]
impl DeviceProber for SnmpDeviceProber {
    async fn get(&self, ip: IpAddr, oid: &str) -> Result<String, ProbeError> {
        let parsed = Oid::parse(oid).map_err(|_| ProbeError::InvalidOid(oid.to_string()))?;
        if parsed.is_empty() {
            return Err(ProbeError::InvalidOid(oid.to_string()));
        }

        debug!("SNMP GET {} {}", ip, parsed);
        let client = Client::builder(self.target(ip), Auth::v2c(self.community.as_str()))
            .timeout(self.timeout)
            .retry(Retry::fixed(self.retries, Duration::ZERO))
            .connect()
            .await
            .map_err(|e| map_snmp_error(ip, e))?;

        let varbind = client
            .get(&parsed)
            .await
            .map_err(|e| map_snmp_error(ip, e))?;

        render_value(ip, &varbind.oid, &varbind.value)
    }
}
