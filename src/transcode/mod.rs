//! Format transcoders: one policy map in, one platform artifact out.
//!
//! - [`registry`]: Windows `.reg` import text
//! - [`profile`]: macOS `.mobileconfig` property list
//! - [`json`]: Linux managed-policy JSON
//!
//! Transcoders only read their input; every call is independent.
pub mod json;
pub mod plist;
pub mod profile;
pub mod registry;

use std::fmt;

use crate::policy::PolicyValue;

/// Policies written to the registry as numbered values under their own subkey.
pub const LIST_POLICIES: &[&str] = &[
    "ExtensionInstallForcelist",
    "ExtensionInstallAllowlist",
    "ExtensionInstallBlocklist",
    "ReportAppInventory",
    "ReportWebsiteTelemetry",
];

/// Report policies that accept `[""]` as "set to an empty string".
pub const REPORT_POLICIES: &[&str] = &["ReportAppInventory", "ReportWebsiteTelemetry"];

/// Fixed keys of the profile payload dictionary that policies may not reuse.
pub const RESERVED_PAYLOAD_KEYS: &[&str] = &[
    "PayloadIdentifier",
    "PayloadType",
    "PayloadUUID",
    "PayloadVersion",
    "PayloadEnabled",
];

/// Whether `value` is the single-empty-string list `[""]`.
#[must_use]
pub fn is_empty_string_sentinel(value: &PolicyValue) -> bool {
    matches!(value.as_list(), Some([only]) if only.is_empty())
}

/// An output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// macOS configuration profile.
    MobileConfig,
    /// Windows registry import file.
    Registry,
    /// Linux managed-policy JSON.
    Json,
}

impl Format {
    /// Every format, in generation order.
    pub const ALL: [Self; 3] = [Self::MobileConfig, Self::Registry, Self::Json];

    /// Platform directory the format is written under.
    #[must_use]
    pub const fn platform_dir(self) -> &'static str {
        match self {
            Self::MobileConfig => "macos",
            Self::Registry => "windows",
            Self::Json => "linux",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MobileConfig => write!(f, "mobileconfig"),
            Self::Registry => write!(f, "registry"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_detection() {
        assert!(is_empty_string_sentinel(&PolicyValue::List(vec![String::new()])));
        assert!(!is_empty_string_sentinel(&PolicyValue::List(vec![])));
        assert!(!is_empty_string_sentinel(&PolicyValue::List(vec![
            String::new(),
            String::new()
        ])));
        assert!(!is_empty_string_sentinel(&PolicyValue::String(String::new())));
    }

    #[test]
    fn report_policies_are_list_policies() {
        for name in REPORT_POLICIES {
            assert!(LIST_POLICIES.contains(name));
        }
    }

    #[test]
    fn format_directories() {
        let dirs: Vec<&str> = Format::ALL.iter().map(|f| f.platform_dir()).collect();
        assert_eq!(dirs, vec!["macos", "windows", "linux"]);
    }
}
