//! Policy values and insertion-ordered policy mappings.
//!
//! A policy document is loosely typed on disk, but only five shapes are
//! meaningful to the output formats. [`PolicyValue`] closes the set so every
//! transcoder can match exhaustively, and [`PolicyMap`] keeps document order
//! because both the registry and JSON outputs must follow it.
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single policy value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyValue {
    /// `true` / `false`.
    Boolean(bool),
    /// Signed integer; the registry keeps only the low 32 bits.
    Integer(i64),
    /// Free-form string.
    String(String),
    /// Ordered list of strings.
    List(Vec<String>),
    /// One level of nested policy values.
    Map(PolicyMap),
}

impl PolicyValue {
    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "mapping",
        }
    }

    /// Return the list items if this value is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for PolicyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for PolicyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PolicyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for PolicyValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for PolicyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PolicyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for PolicyValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<PolicyMap> for PolicyValue {
    fn from(value: PolicyMap) -> Self {
        Self::Map(value)
    }
}

/// Insertion-ordered mapping from policy name to [`PolicyValue`].
///
/// Keys are unique. Re-inserting an existing key replaces its value without
/// moving it, and removal keeps the relative order of the remaining keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyMap {
    entries: Vec<(String, PolicyValue)>,
}

impl PolicyMap {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a policy, returning the previous value if the name was present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PolicyValue>,
    ) -> Option<PolicyValue> {
        let name = name.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((name, value));
        None
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PolicyValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a policy by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PolicyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Remove a policy by name, preserving the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<PolicyValue> {
        let pos = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Whether a policy with this name is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Number of policies.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PolicyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over policy names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<PolicyValue>> FromIterator<(K, V)> for PolicyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

impl Serialize for PolicyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for PolicyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

struct PolicyValueVisitor;

impl<'de> Visitor<'de> for PolicyValueVisitor {
    type Value = PolicyValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, integer, string, list of strings or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(PolicyValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PolicyValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(PolicyValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(E::invalid_type(de::Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PolicyValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(PolicyValue::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<String>()? {
            items.push(item);
        }
        Ok(PolicyValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        let map = PolicyMapVisitor.visit_map(access)?;
        if let Some((name, _)) = map.iter().find(|(_, v)| matches!(v, PolicyValue::Map(_))) {
            return Err(de::Error::custom(format!(
                "'{name}' nests a mapping inside a mapping; only one level of nesting is supported"
            )));
        }
        Ok(PolicyValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for PolicyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PolicyValueVisitor)
    }
}

struct PolicyMapVisitor;

impl<'de> Visitor<'de> for PolicyMapVisitor {
    type Value = PolicyMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of policy names to values")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(PolicyMap::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = PolicyMap::new();
        while let Some(name) = access.next_key::<String>()? {
            // A null value leaves the policy unset.
            let value = access.next_value::<Option<PolicyValue>>()?;
            if map.contains_key(&name) {
                return Err(de::Error::custom(format!("duplicate policy '{name}'")));
            }
            if let Some(value) = value {
                map.insert(name, value);
            }
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for PolicyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PolicyMapVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> PolicyValue {
        PolicyValue::List(items.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn insert_preserves_order() {
        let map = PolicyMap::new()
            .with("Zeta", true)
            .with("Alpha", 1)
            .with("Mid", "x");
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut map = PolicyMap::new().with("A", 1).with("B", 2);
        let old = map.insert("A", 3);
        assert_eq!(old, Some(PolicyValue::Integer(1)));
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[0], ("A", &PolicyValue::Integer(3)));
        assert_eq!(pairs[1], ("B", &PolicyValue::Integer(2)));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut map = PolicyMap::new().with("A", 1).with("B", 2).with("C", 3);
        assert_eq!(map.remove("B"), Some(PolicyValue::Integer(2)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["A", "C"]);
        assert!(map.remove("B").is_none());
    }

    #[test]
    fn deserialize_yaml_keeps_document_order() {
        let yaml = "Zeta: true\nAlpha: 5\nList:\n  - a\n  - b\nNested:\n  Inner: x\n";
        let map: PolicyMap = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            vec!["Zeta", "Alpha", "List", "Nested"]
        );
        assert_eq!(map.get("Zeta"), Some(&PolicyValue::Boolean(true)));
        assert_eq!(map.get("Alpha"), Some(&PolicyValue::Integer(5)));
        assert_eq!(map.get("List"), Some(&list(&["a", "b"])));
        let nested = PolicyMap::new().with("Inner", "x");
        assert_eq!(map.get("Nested"), Some(&PolicyValue::Map(nested)));
    }

    #[test]
    fn deserialize_null_value_drops_policy() {
        let map: PolicyMap = serde_yaml::from_str("A: 1\nB:\nC: 3\n").unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["A", "C"]);
    }

    #[test]
    fn deserialize_rejects_float() {
        let err = serde_yaml::from_str::<PolicyMap>("Ratio: 1.5\n").unwrap_err();
        assert!(err.to_string().contains("floating point"), "{err}");
    }

    #[test]
    fn deserialize_rejects_non_string_list_items() {
        assert!(serde_json::from_str::<PolicyMap>(r#"{"L": [1, 2]}"#).is_err());
    }

    #[test]
    fn deserialize_rejects_two_levels_of_nesting() {
        let yaml = "Outer:\n  Middle:\n    Inner: 1\n";
        let err = serde_yaml::from_str::<PolicyMap>(yaml).unwrap_err();
        assert!(err.to_string().contains("only one level"), "{err}");
    }

    #[test]
    fn deserialize_rejects_duplicate_policy() {
        let err = serde_json::from_str::<PolicyMap>(r#"{"A": 1, "A": 2}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate policy 'A'"), "{err}");
    }

    #[test]
    fn deserialize_rejects_oversized_unsigned() {
        let err = serde_json::from_str::<PolicyMap>(r#"{"A": 18446744073709551615}"#).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn serialize_json_follows_insertion_order() {
        let map = PolicyMap::new().with("B", 1).with("A", true);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"B":1,"A":true}"#);
    }

    #[test]
    fn kind_and_display() {
        assert_eq!(PolicyValue::Boolean(true).kind(), "boolean");
        assert_eq!(list(&["a", "b"]).to_string(), "[a, b]");
        assert_eq!(PolicyValue::Map(PolicyMap::new()).kind(), "mapping");
        let nested = PolicyMap::new().with("A", 1).with("B", "x");
        assert_eq!(PolicyValue::Map(nested).to_string(), "{A: 1, B: x}");
    }
}
