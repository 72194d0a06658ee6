//! macOS configuration profile (`.mobileconfig`) transcoder.
use super::RESERVED_PAYLOAD_KEYS;
use super::plist::{self, Dictionary, PlistValue};
use crate::error::TranscodeError;
use crate::policy::{PolicyMap, ProfileMetadata};

/// Build the profile document for `policies`.
///
/// The single payload dictionary carries its fixed fields first, followed by
/// every policy in input order.
///
/// # Errors
///
/// Returns [`TranscodeError::ReservedKey`] if a policy name would overwrite
/// one of the fixed payload fields.
pub fn build_profile(
    policies: &PolicyMap,
    meta: &ProfileMetadata,
) -> Result<PlistValue, TranscodeError> {
    let mut payload = Dictionary::new();
    payload.insert("PayloadIdentifier", meta.identifier);
    payload.insert("PayloadType", meta.payload_type);
    payload.insert("PayloadUUID", meta.content_uuid);
    payload.insert("PayloadVersion", 1_i64);
    payload.insert("PayloadEnabled", true);
    debug_assert!(RESERVED_PAYLOAD_KEYS.iter().all(|k| payload.contains_key(k)));

    for (name, value) in policies.iter() {
        if payload.contains_key(name) {
            return Err(TranscodeError::ReservedKey(name.to_string()));
        }
        payload.insert(name, PlistValue::from(value));
    }

    let mut profile = Dictionary::new();
    profile.insert("PayloadVersion", 1_i64);
    profile.insert("PayloadScope", "System");
    profile.insert("PayloadType", "Configuration");
    profile.insert("PayloadRemovalDisallowed", false);
    profile.insert("PayloadUUID", meta.profile_uuid);
    profile.insert("PayloadDisplayName", meta.display_name);
    profile.insert("PayloadDescription", meta.description);
    profile.insert("PayloadIdentifier", meta.identifier);
    profile.insert("PayloadContent", vec![PlistValue::Dictionary(payload)]);

    Ok(PlistValue::Dictionary(profile))
}

/// Render `policies` as an XML `.mobileconfig` document.
///
/// # Errors
///
/// Returns an error if a policy name collides with a fixed payload field or
/// the XML writer fails.
pub fn to_mobileconfig(
    policies: &PolicyMap,
    meta: &ProfileMetadata,
) -> Result<Vec<u8>, TranscodeError> {
    let document = build_profile(policies, meta)?;
    Ok(plist::to_xml(&document)?)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::policy::{Browser, PolicyValue, metadata};
    use crate::transcode::plist::reader::read_document;
    use pretty_assertions::assert_eq;

    fn chrome() -> ProfileMetadata {
        metadata(Browser::Chrome).and_then(|m| m.profile).unwrap()
    }

    fn sample() -> PolicyMap {
        PolicyMap::new()
            .with("BrowserSignin", 0)
            .with("SyncDisabled", true)
            .with("HomepageLocation", "https://example.com")
            .with(
                "ExtensionInstallForcelist",
                PolicyValue::List(vec!["abc;https://u".into()]),
            )
            .with("Nested", PolicyMap::new().with("Inner", "x"))
    }

    fn as_dict(value: &PlistValue) -> &Dictionary {
        match value {
            PlistValue::Dictionary(d) => d,
            other => panic!("expected dictionary, got {other:?}"),
        }
    }

    fn payload(doc: &PlistValue) -> &Dictionary {
        match as_dict(doc).get("PayloadContent") {
            Some(PlistValue::Array(items)) => {
                assert_eq!(items.len(), 1, "exactly one payload");
                as_dict(&items[0])
            }
            other => panic!("expected PayloadContent array, got {other:?}"),
        }
    }

    #[test]
    fn outer_fields_come_first_in_fixed_order() {
        let doc = build_profile(&PolicyMap::new(), &chrome()).unwrap();
        let keys: Vec<&str> = as_dict(&doc).keys().collect();
        assert_eq!(
            keys,
            vec![
                "PayloadVersion",
                "PayloadScope",
                "PayloadType",
                "PayloadRemovalDisallowed",
                "PayloadUUID",
                "PayloadDisplayName",
                "PayloadDescription",
                "PayloadIdentifier",
                "PayloadContent",
            ]
        );
    }

    #[test]
    fn payload_spreads_policies_after_fixed_fields() {
        let policies = sample();
        let doc = build_profile(&policies, &chrome()).unwrap();
        let keys: Vec<&str> = payload(&doc).keys().collect();
        let (fixed, rest) = keys.split_at(5);
        assert_eq!(fixed, RESERVED_PAYLOAD_KEYS);
        assert_eq!(rest, policies.keys().collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn payload_identifiers_come_from_metadata() {
        let meta = chrome();
        let doc = build_profile(&PolicyMap::new(), &meta).unwrap();
        let outer = as_dict(&doc);
        let inner = payload(&doc);
        assert_eq!(outer.get("PayloadUUID"), Some(&PlistValue::from(meta.profile_uuid)));
        assert_eq!(inner.get("PayloadUUID"), Some(&PlistValue::from(meta.content_uuid)));
        assert_eq!(inner.get("PayloadIdentifier"), outer.get("PayloadIdentifier"));
        assert_eq!(inner.get("PayloadType"), Some(&PlistValue::from("com.google.Chrome")));
        assert_eq!(inner.get("PayloadEnabled"), Some(&PlistValue::Boolean(true)));
    }

    #[test]
    fn reserved_policy_name_is_rejected() {
        let policies = PolicyMap::new().with("PayloadType", "evil");
        let err = build_profile(&policies, &chrome()).unwrap_err();
        assert!(matches!(err, TranscodeError::ReservedKey(ref k) if k == "PayloadType"));
    }

    #[test]
    fn outer_only_key_is_allowed_in_payload() {
        let policies = PolicyMap::new().with("PayloadScope", "User");
        assert!(build_profile(&policies, &chrome()).is_ok());
    }

    #[test]
    fn serialized_profile_reads_back_with_same_policies() {
        let policies = sample();
        let bytes = to_mobileconfig(&policies, &chrome()).unwrap();
        let doc = read_document(&bytes);
        let inner = payload(&doc);
        for (name, value) in policies.iter() {
            assert_eq!(inner.get(name), Some(&PlistValue::from(value)), "{name}");
        }
        assert_eq!(inner.len(), RESERVED_PAYLOAD_KEYS.len() + policies.len());
    }

    #[test]
    fn output_starts_with_xml_declaration() {
        let bytes = to_mobileconfig(&PolicyMap::new(), &chrome()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE plist"));
        assert!(text.contains("<key>PayloadRemovalDisallowed</key>\n\t<false/>"));
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let policies = sample();
        for browser in Browser::ALL {
            let meta = metadata(browser).and_then(|m| m.profile).unwrap();
            let first = to_mobileconfig(&policies, &meta).unwrap();
            let second = to_mobileconfig(&policies, &meta).unwrap();
            assert_eq!(first, second, "{browser}");
        }
    }
}
