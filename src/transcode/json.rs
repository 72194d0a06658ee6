//! Linux managed-policy JSON transcoder.
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::TranscodeError;
use crate::policy::PolicyMap;

/// Indentation used by Chromium's own policy templates.
const INDENT: &[u8] = b"    ";

/// Render `policies` as a JSON object with four-space indentation.
///
/// Keys keep their input order. The returned string has no trailing newline;
/// the writer appends one.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(policies: &PolicyMap) -> Result<String, TranscodeError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    policies.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
