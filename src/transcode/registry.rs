//! Windows registry (`.reg`) transcoder.
//!
//! Layout of the generated file:
//!
//! ```text
//! Windows Registry Editor Version 5.00
//!
//! [<base key>]
//! "Flat"=dword:00000001
//! "ReportAppInventory"=""
//!
//! [<base key>\Nested]
//! "Sub"="value"
//!
//! [<base key>\ExtensionInstallForcelist]
//! "1"="id;https://update.url"
//! ```
//!
//! Every value that belongs to the base key is emitted before the first
//! subkey header, since `.reg` assigns each value line to the most recent
//! header. Within each group the input order is kept.
use super::{LIST_POLICIES, REPORT_POLICIES, is_empty_string_sentinel};
use crate::policy::{PolicyMap, PolicyValue, RegistryMetadata};

/// First line of every registry import file.
pub const HEADER: &str = "Windows Registry Editor Version 5.00";

/// Line terminator required by `regedit` regardless of host platform.
const CRLF: &str = "\r\n";

/// Format a single value as the right-hand side of a `"name"=value` line.
///
/// Booleans and integers become `dword:` values (integers keep their low 32
/// bits, so negatives appear in two's complement). Lists are joined with
/// `;` into one string; everything else is quoted verbatim.
#[must_use]
pub fn format_value(value: &PolicyValue) -> String {
    match value {
        PolicyValue::Boolean(true) => "dword:00000001".to_string(),
        PolicyValue::Boolean(false) => "dword:00000000".to_string(),
        PolicyValue::Integer(i) => format!("dword:{:08x}", low_dword(*i)),
        PolicyValue::List(items) => format!("\"{}\"", items.join(";")),
        PolicyValue::String(s) => format!("\"{s}\""),
        PolicyValue::Map(_) => format!("\"{value}\""),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn low_dword(v: i64) -> u32 {
    v as u32
}

/// A `[key]` section and its value lines.
#[derive(Debug)]
struct Section {
    key: String,
    values: Vec<String>,
}

impl Section {
    fn new(key: String) -> Self {
        Self {
            key,
            values: Vec::new(),
        }
    }
}

fn value_line(name: &str, formatted: &str) -> String {
    format!("\"{name}\"={formatted}")
}

/// Render `policies` as a `.reg` document rooted at `meta.key`.
///
/// The input is not modified; list policies are split off a private copy.
#[must_use]
pub fn to_registry(policies: &PolicyMap, meta: &RegistryMetadata) -> String {
    let base_key = meta.key;
    let mut remaining = policies.clone();
    let list_policies: Vec<(&str, PolicyValue)> = LIST_POLICIES
        .iter()
        .filter_map(|&name| remaining.remove(name).map(|value| (name, value)))
        .collect();

    let mut base = Section::new(base_key.to_string());
    let mut subkeys = Vec::new();

    for (name, value) in remaining.iter() {
        if let PolicyValue::Map(nested) = value {
            let mut section = Section::new(format!("{base_key}\\{name}"));
            for (sub_name, sub_value) in nested.iter() {
                section
                    .values
                    .push(value_line(sub_name, &format_value(sub_value)));
            }
            subkeys.push(section);
        } else {
            base.values.push(value_line(name, &format_value(value)));
        }
    }

    for (name, value) in &list_policies {
        // Report policies use [""] to mean "set to the empty string".
        if REPORT_POLICIES.contains(name) && is_empty_string_sentinel(value) {
            base.values.push(value_line(name, "\"\""));
            continue;
        }
        let Some(items) = value.as_list() else {
            continue;
        };
        if items.is_empty() || is_empty_string_sentinel(value) {
            continue;
        }
        let mut section = Section::new(format!("{base_key}\\{name}"));
        for (index, item) in items.iter().enumerate() {
            section
                .values
                .push(value_line(&(index + 1).to_string(), &format!("\"{item}\"")));
        }
        subkeys.push(section);
    }

    let mut lines = vec![HEADER.to_string(), String::new()];
    lines.push(format!("[{}]", base.key));
    lines.extend(base.values);
    for section in subkeys {
        lines.push(String::new());
        lines.push(format!("[{}]", section.key));
        lines.extend(section.values);
    }
    lines.join(CRLF)
}
