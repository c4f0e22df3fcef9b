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

//! Vendor description (sysDescr) normalization

use super::common::{clean_value, find_version_token};
use crate::domain::{DomainError, VendorDetails};

/// Ruckus access point device name
pub const RUCKUS_DEVICE_NAME_OID: &str = ".1.3.6.1.4.1.25053.1.1.2.1.1.1.1.0";
/// Ruckus access point software version
pub const RUCKUS_SOFTWARE_VERSION_OID: &str = ".1.3.6.1.4.1.25053.1.1.2.1.1.1.1.1.3.1";
/// Ruckus access point management address
pub const RUCKUS_IP_ADDRESS_OID: &str = ".1.3.6.1.4.1.25053.1.1.4.1.1.4.1.1.2.30";

/// Vendor families with a known description layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorKind {
    ArubaSwitch,
    HpSwitch,
    HpLaserPrinter,
    RuckusAccessPoint,
    Unrecognized,
}

impl VendorKind {
    /// Pick the vendor family from the markers in a description
    pub fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();

        if lower.contains("laserjet") || lower.contains("jetdirect") {
            VendorKind::HpLaserPrinter
        } else if lower.contains("ruckus") || lower.contains("zoneflex") {
            VendorKind::RuckusAccessPoint
        } else if lower.contains("aruba") {
            VendorKind::ArubaSwitch
        } else if lower.contains("procurve")
            || ((lower.starts_with("hp ") || lower.starts_with("hpe ")) && lower.contains("switch"))
        {
            VendorKind::HpSwitch
        } else {
            VendorKind::Unrecognized
        }
    }

    /// Normalize a description of this vendor family
    ///
    /// # Returns
    /// * `Ok(VendorDetails)` - Extracted fields
    /// * `Err(DomainError::ParsingFailed)` - The description does not follow
    ///   the family's layout, or the family is unrecognized
    pub fn extract(&self, description: &str) -> Result<VendorDetails, DomainError> {
        match self {
            VendorKind::ArubaSwitch => parse_aruba_switch(description),
            VendorKind::HpSwitch => parse_hp_switch(description),
            VendorKind::HpLaserPrinter => parse_hp_laser(description),
            VendorKind::RuckusAccessPoint => parse_ruckus_ap(description),
            VendorKind::Unrecognized => Err(DomainError::ParsingFailed(
                "unrecognized vendor description".to_string(),
            )),
        }
    }

    /// Vendor-specific OIDs worth polling for this family
    pub fn extra_oids(&self) -> Option<Vec<String>> {
        match self {
            VendorKind::RuckusAccessPoint => Some(vec![
                RUCKUS_DEVICE_NAME_OID.to_string(),
                RUCKUS_SOFTWARE_VERSION_OID.to_string(),
                RUCKUS_IP_ADDRESS_OID.to_string(),
            ]),
            _ => None,
        }
    }
}

/// Parse an Aruba switch banner
///
/// `"Aruba JL258A 2930F-8G-PoE+-2SFP+ Switch, revision WC.16.10.0012, ROM ..."`
pub fn parse_aruba_switch(description: &str) -> Result<VendorDetails, DomainError> {
    let head = description.split(',').next().unwrap_or_default();
    let device = clean_value(head.split("Switch").next().unwrap_or_default());
    if device.is_empty() {
        return Err(DomainError::ParsingFailed(format!(
            "no device name in Aruba description: {description}"
        )));
    }

    Ok(VendorDetails::new(device, find_version_token(description), None))
}

/// Parse an HP/ProCurve switch banner
///
/// The first line holds `<os banner>, revision <version>, ...`; the second
/// line holds the device name.
pub fn parse_hp_switch(description: &str) -> Result<VendorDetails, DomainError> {
    let mut lines = description.lines();
    let banner = lines.next().unwrap_or_default();
    let device = lines.next().map(clean_value).unwrap_or_default();
    if device.is_empty() {
        return Err(DomainError::ParsingFailed(format!(
            "no device line in HP switch description: {description}"
        )));
    }

    let mut fields = banner.split(',');
    let os = clean_value(fields.next().unwrap_or_default());
    let version = fields
        .next()
        .and_then(|field| field.split_whitespace().last())
        .map(str::to_string)
        .ok_or_else(|| {
            DomainError::ParsingFailed(format!(
                "no version field in HP switch description: {description}"
            ))
        })?;

    Ok(VendorDetails::new(
        device,
        Some(version),
        (!os.is_empty()).then_some(os),
    ))
}

/// Parse an HP LaserJet description: `<model>;<firmware> ...`
pub fn parse_hp_laser(description: &str) -> Result<VendorDetails, DomainError> {
    let mut fields = description.split(';');
    let device = clean_value(fields.next().unwrap_or_default());
    let version = fields
        .next()
        .and_then(|field| field.split_whitespace().next())
        .map(str::to_string);

    match version {
        Some(version) if !device.is_empty() => Ok(VendorDetails::new(device, Some(version), None)),
        _ => Err(DomainError::ParsingFailed(format!(
            "unexpected LaserJet description: {description}"
        ))),
    }
}

/// Ruckus descriptions carry only a model banner
pub fn parse_ruckus_ap(description: &str) -> Result<VendorDetails, DomainError> {
    let device = clean_value(description.lines().next().unwrap_or_default());
    if device.is_empty() {
        return Err(DomainError::ParsingFailed(
            "empty Ruckus description".to_string(),
        ));
    }
    Ok(VendorDetails::new(device, find_version_token(description), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARUBA: &str = "Aruba JL258A 2930F-8G-PoE+-2SFP+ Switch, revision WC.16.10.0012, ROM WC.16.01.0008 (/ws/swbuildm/rel_ukiah_qaoff/code/build/bbm(swbuildm_rel_ukiah_qaoff_rel_ukiah))";
    const HP_SWITCH: &str = "ProCurve J9145A Switch 2910al-24G, revision W.14.49, ROM W.14.04 (/sw/code/build/sbm(t4a))\nHP-2910al-24G";
    const LASERJET: &str = "HP LaserJet Pro M404dn;20200603 002.2023A";

    #[test]
    fn test_classify() {
        assert_eq!(VendorKind::classify(ARUBA), VendorKind::ArubaSwitch);
        assert_eq!(VendorKind::classify(HP_SWITCH), VendorKind::HpSwitch);
        assert_eq!(VendorKind::classify(LASERJET), VendorKind::HpLaserPrinter);
        assert_eq!(
            VendorKind::classify("HP J9772A 2530-48G-PoEP Switch, revision YA.16.02"),
            VendorKind::HpSwitch
        );
        assert_eq!(
            VendorKind::classify("Ruckus Wireless ZF7372 Multimedia Hotzone Wireless AP"),
            VendorKind::RuckusAccessPoint
        );
        assert_eq!(
            VendorKind::classify("Linux gateway 5.15.0-91-generic"),
            VendorKind::Unrecognized
        );
    }

    #[test]
    fn test_parse_aruba_switch() {
        let details = VendorKind::ArubaSwitch.extract(ARUBA).unwrap();
        assert_eq!(details.device, "Aruba JL258A 2930F-8G-PoE+-2SFP+");
        assert_eq!(details.version.as_deref(), Some("WC.16.10.0012"));
        assert_eq!(details.os, None);
    }

    #[test]
    fn test_parse_hp_switch() {
        let details = VendorKind::HpSwitch.extract(HP_SWITCH).unwrap();
        assert_eq!(details.device, "HP-2910al-24G");
        assert_eq!(details.version.as_deref(), Some("W.14.49"));
        assert_eq!(
            details.os.as_deref(),
            Some("ProCurve J9145A Switch 2910al-24G")
        );
    }

    #[test]
    fn test_parse_hp_switch_single_line_fails() {
        let result = parse_hp_switch("ProCurve J9145A Switch 2910al-24G, revision W.14.49");
        assert!(matches!(result, Err(DomainError::ParsingFailed(_))));
    }

    #[test]
    fn test_parse_hp_laser() {
        let details = VendorKind::HpLaserPrinter.extract(LASERJET).unwrap();
        assert_eq!(details.device, "HP LaserJet Pro M404dn");
        assert_eq!(details.version.as_deref(), Some("20200603"));
        assert!(parse_hp_laser("HP LaserJet Pro M404dn").is_err());
    }

    #[test]
    fn test_unrecognized_is_an_explicit_error() {
        let result = VendorKind::Unrecognized.extract("anything");
        assert!(matches!(result, Err(DomainError::ParsingFailed(_))));
    }

    #[test]
    fn test_extra_oids_only_for_ruckus() {
        let oids = VendorKind::RuckusAccessPoint.extra_oids().unwrap();
        assert_eq!(oids.len(), 3);
        assert!(oids.contains(&RUCKUS_SOFTWARE_VERSION_OID.to_string()));
        assert!(VendorKind::ArubaSwitch.extra_oids().is_none());
    }
}
