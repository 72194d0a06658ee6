//! Static per-browser metadata for each output format.
//!
//! The profile UUIDs are fixed constants: macOS identifies an installed
//! configuration profile by them, so regenerating must never change them or
//! a re-deployed profile would install alongside the old one instead of
//! replacing it.
use super::Browser;

/// macOS configuration-profile metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileMetadata {
    /// Human-readable profile name shown in System Settings.
    pub display_name: &'static str,
    /// Profile description.
    pub description: &'static str,
    /// Reverse-DNS identifier of the profile and its payload.
    pub identifier: &'static str,
    /// Preference domain the payload manages.
    pub payload_type: &'static str,
    /// UUID of the outer profile document.
    pub profile_uuid: &'static str,
    /// UUID of the single payload inside the profile.
    pub content_uuid: &'static str,
}

/// Windows registry metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryMetadata {
    /// Root key the policies are written under.
    pub key: &'static str,
}

/// Linux managed-policy metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonMetadata {
    /// Output file name; `None` falls back to `<browser>.json`.
    pub filename: Option<&'static str>,
    /// Directory the browser reads managed policies from. Informational only.
    pub install_path_hint: &'static str,
}

/// All format metadata for one browser. A missing section means the browser
/// is not generated for that platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserMetadata {
    /// macOS configuration profile metadata.
    pub profile: Option<ProfileMetadata>,
    /// Windows registry metadata.
    pub registry: Option<RegistryMetadata>,
    /// Linux managed-policy JSON metadata.
    pub json: Option<JsonMetadata>,
}

impl JsonMetadata {
    /// Resolve the output file name for `browser`.
    #[must_use]
    pub fn file_name(&self, browser: Browser) -> String {
        self.filename
            .map_or_else(|| format!("{browser}.json"), ToString::to_string)
    }
}

const CHROME: BrowserMetadata = BrowserMetadata {
    profile: Some(ProfileMetadata {
        display_name: "Google Chrome Policies",
        description: "Google Chrome Browser system-level policies",
        identifier: "com.google.Chrome",
        payload_type: "com.google.Chrome",
        profile_uuid: "8568e67e-21ba-4bdc-a944-a30fb301ba02",
        content_uuid: "3eb9eb1f-412c-4f8b-b425-f95f1a67072d",
    }),
    registry: Some(RegistryMetadata {
        key: r"HKEY_LOCAL_MACHINE\SOFTWARE\Policies\Google\Chrome",
    }),
    json: Some(JsonMetadata {
        filename: Some("chrome.json"),
        install_path_hint: "/etc/opt/chrome/policies/managed/",
    }),
};

const BRAVE: BrowserMetadata = BrowserMetadata {
    profile: Some(ProfileMetadata {
        display_name: "Brave Policies",
        description: "Brave Browser system-level policies",
        identifier: "com.brave.Browser",
        payload_type: "com.brave.Browser",
        profile_uuid: "e143b891-3398-48f9-bee1-54d3b6db44b3",
        content_uuid: "88032831-5301-41ad-8231-10efa9d67ab3",
    }),
    registry: Some(RegistryMetadata {
        key: r"HKEY_LOCAL_MACHINE\SOFTWARE\Policies\BraveSoftware\Brave",
    }),
    json: Some(JsonMetadata {
        filename: Some("brave.json"),
        install_path_hint: "/etc/brave/policies/managed/",
    }),
};

const EDGE: BrowserMetadata = BrowserMetadata {
    profile: Some(ProfileMetadata {
        display_name: "Microsoft Edge Policies",
        description: "Microsoft Edge Browser system-level policies",
        identifier: "com.microsoft.Edge",
        payload_type: "com.microsoft.Edge",
        profile_uuid: "778fb3c3-2e58-4337-86dc-1a8044793d2d",
        content_uuid: "65ffbe44-b556-4c33-88ea-ab684dab69bc",
    }),
    registry: Some(RegistryMetadata {
        key: r"HKEY_LOCAL_MACHINE\Software\Policies\Microsoft\Edge",
    }),
    json: Some(JsonMetadata {
        filename: Some("edge.json"),
        install_path_hint: "/etc/opt/edge/policies/managed/",
    }),
};

/// Look up the metadata for `browser`.
///
/// Returns `Option` so callers treat a browser without metadata as skippable;
/// every current [`Browser`] has an entry.
#[must_use]
pub const fn metadata(browser: Browser) -> Option<&'static BrowserMetadata> {
    match browser {
        Browser::Chrome => Some(&CHROME),
        Browser::Brave => Some(&BRAVE),
        Browser::Edge => Some(&EDGE),
    }
}
