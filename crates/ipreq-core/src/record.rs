//! Shared record types for the request pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::temporal;

/// Telecom carrier owning an IP allocation.
///
/// Serialized with the short codes the cache file and the compliance
/// departments use (`"JIO"`, `"AIRTEL"`, ...). `Unknown` marks a failed
/// lookup and is never written to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    #[serde(rename = "JIO")]
    Jio,
    #[serde(rename = "AIRTEL")]
    Airtel,
    #[serde(rename = "VI")]
    Vi,
    #[serde(rename = "BSNL")]
    Bsnl,
    #[serde(rename = "OTHER")]
    Other,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Carrier {
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::Jio => "JIO",
            Self::Airtel => "AIRTEL",
            Self::Vi => "VI",
            Self::Bsnl => "BSNL",
            Self::Other => "OTHER",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Registered legal entity name, used for the `{ISP_NAME}` letter
    /// placeholder. Carriers without a mapped legal name pass the short
    /// code through.
    pub fn legal_name(&self) -> &'static str {
        match self {
            Self::Jio => "Reliance Jio Infocomm Ltd.",
            Self::Airtel => "Bharti Airtel Ltd.",
            Self::Vi => "Vodafone Idea Ltd.",
            other => other.short_code(),
        }
    }

    /// Whether this classification may be written to the resolution cache.
    /// `Unknown` is a transient lookup failure, not a classification.
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

/// IP address family, derived from the address text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// A `:` anywhere in the text means IPv6. Deliberately not a full
    /// address validation; report inputs are carrier-grade captures.
    pub fn of(ip: &str) -> Self {
        if ip.contains(':') { Self::V6 } else { Self::V4 }
    }

    /// Label used in the first column of every carrier artifact.
    pub fn label(&self) -> &'static str {
        match self {
            Self::V4 => "IPV4",
            Self::V6 => "IPV6",
        }
    }
}

/// One login event as extracted from the source report, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub timestamp_text: String,
    pub ip_text: String,
}

/// Subject details pulled from the report plus FIR references supplied by
/// the investigator. FIR fields default to empty; the report never carries
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMetadata {
    pub subject_name: String,
    pub contact_email: String,
    pub fir_number: String,
    pub fir_date: String,
}

impl Default for CaseMetadata {
    fn default() -> Self {
        Self {
            subject_name: "Unknown".to_string(),
            contact_email: "Unknown".to_string(),
            fir_number: String::new(),
            fir_date: String::new(),
        }
    }
}

/// A login record after carrier resolution and temporal normalization.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    pub ip: String,
    pub timestamp_text: String,
    pub carrier: Carrier,
    pub family: AddressFamily,
    pub local_time: NaiveDateTime,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
}

impl ResolvedRecord {
    pub fn from_raw(raw: RawRecord, carrier: Carrier) -> Self {
        let window = temporal::normalize(&raw.timestamp_text);
        Self {
            family: AddressFamily::of(&raw.ip_text),
            ip: raw.ip_text,
            timestamp_text: raw.timestamp_text,
            carrier,
            local_time: window.local_time,
            window_start: window.window_start,
            window_end: window.window_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv6_detected_by_colon() {
        assert_eq!(AddressFamily::of("2409:40e3:5:a865::1"), AddressFamily::V6);
        assert_eq!(AddressFamily::of("49.36.112.8"), AddressFamily::V4);
    }

    #[test]
    fn family_labels() {
        assert_eq!(AddressFamily::V4.label(), "IPV4");
        assert_eq!(AddressFamily::V6.label(), "IPV6");
    }

    #[test]
    fn carrier_cache_codes() {
        assert_eq!(serde_json::to_string(&Carrier::Jio).unwrap(), "\"JIO\"");
        assert_eq!(serde_json::to_string(&Carrier::Vi).unwrap(), "\"VI\"");
        let parsed: Carrier = serde_json::from_str("\"AIRTEL\"").unwrap();
        assert_eq!(parsed, Carrier::Airtel);
    }

    #[test]
    fn legal_names_only_for_mapped_carriers() {
        assert_eq!(Carrier::Jio.legal_name(), "Reliance Jio Infocomm Ltd.");
        assert_eq!(Carrier::Airtel.legal_name(), "Bharti Airtel Ltd.");
        assert_eq!(Carrier::Vi.legal_name(), "Vodafone Idea Ltd.");
        assert_eq!(Carrier::Bsnl.legal_name(), "BSNL");
        assert_eq!(Carrier::Other.legal_name(), "OTHER");
    }

    #[test]
    fn unknown_is_not_cacheable() {
        assert!(!Carrier::Unknown.is_cacheable());
        assert!(Carrier::Other.is_cacheable());
        assert!(Carrier::Bsnl.is_cacheable());
    }

    #[test]
    fn resolved_record_derives_family_and_window() {
        let raw = RawRecord {
            timestamp_text: "2025-07-11 15:26:17 Z".to_string(),
            ip_text: "49.36.112.8".to_string(),
        };
        let resolved = ResolvedRecord::from_raw(raw, Carrier::Jio);
        assert_eq!(resolved.family, AddressFamily::V4);
        assert_eq!(
            resolved.local_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2025-07-11 20:56:17"
        );
    }
}
