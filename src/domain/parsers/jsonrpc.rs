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

//! Parsing of monitoring API JSON-RPC responses

use crate::domain::{ApiError, HostItem, HostSummary};
use serde_json::Value;
use std::net::IpAddr;

/// Describe a JSON-RPC `error` object, if the response carries one
pub fn rpc_error_message(response: &Value) -> Option<String> {
    let error = response.get("error")?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    match error.get("data").and_then(Value::as_str) {
        Some(data) if !data.is_empty() => Some(format!("{message} ({data})")),
        _ => Some(message.to_string()),
    }
}

/// Extract the `result` field, mapping JSON-RPC errors to protocol errors
fn result_field(response: &Value) -> Result<&Value, ApiError> {
    if let Some(message) = rpc_error_message(response) {
        return Err(ApiError::Protocol(message));
    }
    response
        .get("result")
        .ok_or_else(|| ApiError::Protocol("response has no result field".to_string()))
}

/// Parse a `user.login` response into the session token
pub fn parse_login_response(response: &Value) -> Result<String, ApiError> {
    if let Some(message) = rpc_error_message(response) {
        return Err(ApiError::Auth(message));
    }
    match response.get("result").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        Some(_) => Err(ApiError::Auth("empty session token".to_string())),
        None => Err(ApiError::Auth(
            "login response has no result field".to_string(),
        )),
    }
}

/// Parse a `host.get` response
///
/// Hosts without interfaces, or whose first interface address does not
/// parse, are returned with `ip = None`.
pub fn parse_host_list(response: &Value) -> Result<Vec<HostSummary>, ApiError> {
    let entries = result_field(response)?
        .as_array()
        .ok_or_else(|| ApiError::Protocol("host list result is not an array".to_string()))?;

    entries
        .iter()
        .map(|entry| {
            let host_id = string_field(entry, "hostid")
                .ok_or_else(|| ApiError::Protocol(format!("host entry without hostid: {entry}")))?;
            let name = string_field(entry, "name")
                .or_else(|| string_field(entry, "host"))
                .unwrap_or_else(|| host_id.clone());
            let ip = entry
                .get("interfaces")
                .and_then(Value::as_array)
                .and_then(|interfaces| interfaces.first())
                .and_then(|interface| interface.get("ip"))
                .and_then(Value::as_str)
                .and_then(|ip| ip.trim().parse::<IpAddr>().ok());

            Ok(HostSummary { host_id, name, ip })
        })
        .collect()
}

/// Parse an `item.get` response; an empty result is not an error
pub fn parse_item_list(response: &Value) -> Result<Vec<HostItem>, ApiError> {
    let entries = result_field(response)?
        .as_array()
        .ok_or_else(|| ApiError::Protocol("item list result is not an array".to_string()))?;

    Ok(entries
        .iter()
        .filter_map(|entry| {
            Some(HostItem {
                item_id: string_field(entry, "itemid")?,
                name: string_field(entry, "name")?,
                last_value: string_field(entry, "lastvalue").unwrap_or_default(),
            })
        })
        .collect())
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
