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

use crate::domain::ProbeError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Secondary port - Single-OID device prober
///
/// One call is one request/response exchange with the device. Timeouts and
/// transport retries belong to the implementation; callers never retry.
#[async_trait]
pub trait DeviceProber: Send + Sync {
    /// Fetch one OID from a device
    ///
    /// # Arguments
    /// * `ip` - Device address
    /// * `oid` - Dotted OID, with or without a leading dot
    ///
    /// # Returns
    /// * `Ok(String)` - Raw `<oid> = <value>` text
    /// * `Err(ProbeError::Unreachable)` - Timeout or empty response
    /// * `Err(ProbeError)` - Any other failure
    async fn get(&self, ip: IpAddr, oid: &str) -> Result<String, ProbeError>;
}
