//! Minimal XML property-list model and writer.
//!
//! Dictionaries keep insertion order: configuration profiles are read by
//! humans as often as by `profiles(8)`, and the fixed payload fields are
//! expected to lead.
use std::borrow::Cow;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::TranscodeError;
use crate::policy::PolicyValue;

/// XML declaration, doctype and opening `<plist>` element.
const PROLOGUE: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
    "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
    "<plist version=\"1.0\">\n",
);

const EPILOGUE: &str = "\n</plist>\n";

/// A property-list value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistValue {
    /// `<true/>` or `<false/>`.
    Boolean(bool),
    /// `<integer>`.
    Integer(i64),
    /// `<string>`.
    String(String),
    /// `<array>`.
    Array(Vec<PlistValue>),
    /// `<dict>`.
    Dictionary(Dictionary),
}

/// Insertion-ordered property-list dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<(String, PlistValue)>,
}

impl Dictionary {
    /// Create an empty dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `value` under `key`, returning the previous value if present.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PlistValue>,
    ) -> Option<PlistValue> {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlistValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PlistValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Dictionary> for PlistValue {
    fn from(value: Dictionary) -> Self {
        Self::Dictionary(value)
    }
}

impl From<Vec<Self>> for PlistValue {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(value)
    }
}

impl From<&PolicyValue> for PlistValue {
    fn from(value: &PolicyValue) -> Self {
        match value {
            PolicyValue::Boolean(b) => Self::Boolean(*b),
            PolicyValue::Integer(i) => Self::Integer(*i),
            PolicyValue::String(s) => Self::String(s.clone()),
            PolicyValue::List(items) => {
                Self::Array(items.iter().map(|s| Self::String(s.clone())).collect())
            }
            PolicyValue::Map(map) => {
                let mut dict = Dictionary::new();
                for (k, v) in map.iter() {
                    dict.insert(k, Self::from(v));
                }
                Self::Dictionary(dict)
            }
        }
    }
}

/// Serialize `root` as an XML property-list document.
///
/// Line breaks in keys and strings are normalised to `\n`.
///
/// # Errors
///
/// Returns [`TranscodeError::ControlCharacter`] if a key or string holds a
/// character XML 1.0 cannot carry, or an error if the XML writer fails.
pub fn to_xml(root: &PlistValue) -> Result<Vec<u8>, TranscodeError> {
    let buf = PROLOGUE.as_bytes().to_vec();
    let mut writer = Writer::new_with_indent(buf, b'\t', 1);
    write_value(&mut writer, root)?;
    let mut out = writer.into_inner();
    out.extend_from_slice(EPILOGUE.as_bytes());
    Ok(out)
}

fn write_value(writer: &mut Writer<Vec<u8>>, value: &PlistValue) -> Result<(), TranscodeError> {
    match value {
        PlistValue::Boolean(b) => {
            let tag = if *b { "true" } else { "false" };
            write_event(writer, Event::Empty(BytesStart::new(tag)))?;
        }
        PlistValue::Integer(i) => write_text_element(writer, "integer", &i.to_string())?,
        PlistValue::String(s) => write_text_element(writer, "string", s)?,
        PlistValue::Array(items) if items.is_empty() => {
            write_event(writer, Event::Empty(BytesStart::new("array")))?;
        }
        PlistValue::Array(items) => {
            write_event(writer, Event::Start(BytesStart::new("array")))?;
            for item in items {
                write_value(writer, item)?;
            }
            write_event(writer, Event::End(BytesEnd::new("array")))?;
        }
        PlistValue::Dictionary(dict) if dict.is_empty() => {
            write_event(writer, Event::Empty(BytesStart::new("dict")))?;
        }
        PlistValue::Dictionary(dict) => {
            write_event(writer, Event::Start(BytesStart::new("dict")))?;
            for (key, item) in dict.iter() {
                write_text_element(writer, "key", key)?;
                write_value(writer, item)?;
            }
            write_event(writer, Event::End(BytesEnd::new("dict")))?;
        }
    }
    Ok(())
}

/// Write `<tag>text</tag>` on one line. The text event is written even when
/// empty so the closing tag is not pushed onto an indented line.
fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    text: &str,
) -> Result<(), TranscodeError> {
    if text.chars().any(is_forbidden_control) {
        return Err(TranscodeError::ControlCharacter(text.to_string()));
    }
    let text = normalize_line_endings(text);
    let escaped: Cow<'_, str> = partial_escape(text.as_ref());
    write_event(writer, Event::Start(BytesStart::new(tag)))?;
    write_event(writer, Event::Text(BytesText::from_escaped(escaped)))?;
    write_event(writer, Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), TranscodeError> {
    writer.write_event(event).map_err(quick_xml::Error::from)?;
    Ok(())
}

/// C0 controls other than tab, line feed and carriage return.
const fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}')
}

/// Rewrite `\r\n` and lone `\r` as `\n`.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
