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

//! Common parsing utilities and helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref VERSION_TOKEN_RE: Regex =
        Regex::new(r"(?i)\b(?:version|revision)\s+([^\s,;()]+)").unwrap();
    pub static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Extract the value part of a raw `<oid> = <value>` probe response
///
/// Text without a separator is returned whole. The result is trimmed.
pub fn probe_value(raw: &str) -> &str {
    raw.rsplit('=').next().unwrap_or(raw).trim()
}

/// Find the token following `Version` or `revision`
///
/// # Returns
/// * `Some(String)` - The version token
/// * `None` - No version marker in the text
pub fn find_version_token(text: &str) -> Option<String> {
    VERSION_TOKEN_RE
        .captures(text)
        .map(|captures| captures[1].to_string())
}

/// Parse a key-value pair from probe output
///
/// # Arguments
/// * `line` - Line to parse (e.g., "SNMPv2-MIB::sysName.0 = core-sw-01")
/// * `separator` - Separator character (usually '=')
///
/// # Returns
/// * `Ok((String, String))` - Key-value pair
/// * `Err(String)` - Parse error
pub fn parse_key_value(line: &str, separator: char) -> Result<(String, String), String> {
    if let Some(pos) = line.find(separator) {
        let key = line[..pos].trim().to_string();
        let value = line[pos + 1..].trim().to_string();
        Ok((key, value))
    } else {
        Err(format!("No separator '{separator}' found in line: {line}"))
    }
}

/// Clean and normalize a string value
///
/// Collapses runs of whitespace (tabs included) into single spaces.
pub fn clean_value(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").to_string()
}

/// Split a hyphen-delimited list, dropping empty entries
///
/// # Arguments
/// * `raw` - List such as `"10.0.0.0/8-192.168.1."`
pub fn split_hyphen_list(raw: &str) -> Vec<String> {
    raw.split('-')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
