//! Pre-generation checks for policy sets and the browser metadata table.
use super::{Browser, PolicyMap, PolicyValue, metadata};
use crate::transcode::{
    LIST_POLICIES, REPORT_POLICIES, RESERVED_PAYLOAD_KEYS, is_empty_string_sentinel,
};

/// Registry hives accepted as the root of a policy key.
const VALID_REGISTRY_HIVES: &[&str] = &["HKEY_LOCAL_MACHINE\\", "HKEY_CURRENT_USER\\"];

/// A validation warning detected before generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Browser the warning applies to (e.g., "chrome").
    pub source: String,
    /// Policy name that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for `item` in `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for policy-map validators.
///
/// Validators never reject a policy set; they point out entries that a
/// target format will drop, rewrite, or emit in a form the platform may not
/// accept.
pub trait PolicyValidator {
    /// Validate `policies` for `browser` and return any warnings found.
    fn validate(&self, browser: Browser, policies: &PolicyMap) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator.
    fn name(&self) -> &'static str;
}

/// Flags policy names that shadow the fixed fields of the profile payload.
#[derive(Debug)]
pub struct PayloadKeyValidator;

impl PolicyValidator for PayloadKeyValidator {
    fn validate(&self, browser: Browser, policies: &PolicyMap) -> Vec<ValidationWarning> {
        policies
            .keys()
            .filter(|name| RESERVED_PAYLOAD_KEYS.contains(name))
            .map(|name| {
                ValidationWarning::new(
                    browser.as_str(),
                    name,
                    "name is reserved by the configuration profile; macOS output will fail",
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "payload keys"
    }
}

/// Flags list policies whose value will be omitted from the registry file.
#[derive(Debug)]
pub struct ListPolicyValidator;

impl PolicyValidator for ListPolicyValidator {
    fn validate(&self, browser: Browser, policies: &PolicyMap) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for &name in LIST_POLICIES {
            let Some(value) = policies.get(name) else {
                continue;
            };
            let message = match value {
                PolicyValue::List(items) if items.is_empty() => {
                    Some("empty list is omitted from registry output".to_string())
                }
                PolicyValue::List(_)
                    if is_empty_string_sentinel(value) && !REPORT_POLICIES.contains(&name) =>
                {
                    Some(
                        "[\"\"] only clears report policies; omitted from registry output"
                            .to_string(),
                    )
                }
                PolicyValue::List(_) => None,
                other => Some(format!(
                    "expected a list but found a {}; omitted from registry output",
                    other.kind()
                )),
            };
            if let Some(message) = message {
                warnings.push(ValidationWarning::new(browser.as_str(), name, message));
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "list policies"
    }
}

/// Flags strings the registry file writes verbatim but cannot represent.
#[derive(Debug)]
pub struct RegistryStringValidator;

impl RegistryStringValidator {
    fn unsafe_string(s: &str) -> bool {
        s.contains('"') || s.contains('\n') || s.contains('\r')
    }

    fn check(value: &PolicyValue) -> bool {
        match value {
            PolicyValue::String(s) => Self::unsafe_string(s),
            PolicyValue::List(items) => items.iter().any(|s| Self::unsafe_string(s)),
            PolicyValue::Map(map) => map.iter().any(|(_, v)| Self::check(v)),
            PolicyValue::Boolean(_) | PolicyValue::Integer(_) => false,
        }
    }
}

impl PolicyValidator for RegistryStringValidator {
    fn validate(&self, browser: Browser, policies: &PolicyMap) -> Vec<ValidationWarning> {
        policies
            .iter()
            .filter(|(_, value)| Self::check(value))
            .map(|(name, _)| {
                ValidationWarning::new(
                    browser.as_str(),
                    name,
                    "contains a quote or line break; the registry file may not import",
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "registry strings"
    }
}

/// Every policy validator, in the order they run.
pub const VALIDATORS: &[&dyn PolicyValidator] = &[
    &PayloadKeyValidator,
    &ListPolicyValidator,
    &RegistryStringValidator,
];

/// Run every policy validator against one browser's policies.
#[must_use]
pub fn validate(browser: Browser, policies: &PolicyMap) -> Vec<ValidationWarning> {
    VALIDATORS
        .iter()
        .flat_map(|v| v.validate(browser, policies))
        .collect()
}

/// Check the static metadata table for `browser`.
#[must_use]
pub fn validate_metadata(browser: Browser) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let Some(meta) = metadata(browser) else {
        warnings.push(ValidationWarning::new(
            browser.as_str(),
            "metadata",
            "no metadata defined",
        ));
        return warnings;
    };

    if let Some(registry) = meta.registry {
        let key_upper = registry.key.to_uppercase();
        if !VALID_REGISTRY_HIVES
            .iter()
            .any(|hive| key_upper.starts_with(hive))
        {
            warnings.push(ValidationWarning::new(
                browser.as_str(),
                registry.key,
                "registry key should start with HKEY_LOCAL_MACHINE\\ or HKEY_CURRENT_USER\\",
            ));
        }
    }

    if let Some(profile) = meta.profile
        && profile.profile_uuid.eq_ignore_ascii_case(profile.content_uuid)
    {
        warnings.push(ValidationWarning::new(
            browser.as_str(),
            profile.identifier,
            "profile and payload UUIDs must differ",
        ));
    }

    warnings
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> PolicyValue {
        PolicyValue::List(items.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn validators_have_distinct_names() {
        let names: Vec<&str> = VALIDATORS.iter().map(|v| v.name()).collect();
        assert_eq!(names, ["payload keys", "list policies", "registry strings"]);
    }

    #[test]
    fn clean_policies_produce_no_warnings() {
        let policies = PolicyMap::new()
            .with("BrowserSignin", 0)
            .with("ExtensionInstallForcelist", list(&["abc;https://x"]))
            .with("ReportAppInventory", list(&[""]));
        assert!(validate(Browser::Chrome, &policies).is_empty());
    }

    #[test]
    fn reserved_payload_key_is_flagged() {
        let policies = PolicyMap::new().with("PayloadUUID", "x");
        let warnings = PayloadKeyValidator.validate(Browser::Chrome, &policies);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, "PayloadUUID");
        assert_eq!(warnings[0].source, "chrome");
    }

    #[test]
    fn non_list_value_for_list_policy_is_flagged() {
        let policies = PolicyMap::new().with("ExtensionInstallBlocklist", "*");
        let warnings = ListPolicyValidator.validate(Browser::Edge, &policies);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("found a string"));
    }

    #[test]
    fn empty_list_policy_is_flagged() {
        let policies = PolicyMap::new().with("ExtensionInstallAllowlist", list(&[]));
        let warnings = ListPolicyValidator.validate(Browser::Brave, &policies);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("empty list"));
    }

    #[test]
    fn sentinel_on_non_report_policy_is_flagged() {
        let policies = PolicyMap::new().with("ExtensionInstallForcelist", list(&[""]));
        let warnings = ListPolicyValidator.validate(Browser::Chrome, &policies);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("report policies"));
    }

    #[test]
    fn quote_in_nested_string_is_flagged() {
        let nested = PolicyMap::new().with("Url", "say \"hi\"");
        let policies = PolicyMap::new().with("Settings", nested);
        let warnings = RegistryStringValidator.validate(Browser::Chrome, &policies);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, "Settings");
    }

    #[test]
    fn static_metadata_is_valid() {
        for browser in Browser::ALL {
            assert!(validate_metadata(browser).is_empty(), "{browser}");
        }
    }
}
