//! Non-standard (`X-...`) iCal properties attached to a task

use std::iter::FromIterator;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The set of iCal properties of a task that this crate does not model as
/// typed fields (`X-APPLE-SORT-ORDER`, client-specific markers, ...).
///
/// Keys are the raw property lines' names, including their parameter text
/// (e.g. `X-FOO;LANG=en`), stored in first-seen order so that re-serializing
/// a task writes them back in the order the server sent them. Values are held
/// in readable form: their wire escaping is undone on parse and applied again
/// on serialization.
///
/// Keys can be addressed two ways:
/// * by raw key, compared ASCII-case-insensitively ([`get`](Self::get),
///   [`set`](Self::set), [`remove`](Self::remove));
/// * by *normalized* name ([`get_normalized`](Self::get_normalized),
///   [`set_normalized`](Self::set_normalized)), where `X-APPLE-SORT-ORDER`
///   becomes `apple_sort_order`. This is the ergonomic form application code
///   usually wants.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtraProperties {
    /// (raw key, value) pairs, in insertion order
    entries: Vec<(String, String)>,
}

impl ExtraProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(raw key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(stored, _)| stored.eq_ignore_ascii_case(key))
    }

    /// Returns the value stored under this raw key (ASCII-case-insensitive)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key)
            .map(|index| self.entries[index].1.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Inserts or overwrites a value. When a key that only differs in case is
    /// already present, its original spelling is kept and only the value is
    /// replaced. Returns the previous value, if any.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes a raw key (ASCII-case-insensitive) and returns its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key).map(|index| self.entries.remove(index).1)
    }

    /// Returns the value whose key *normalizes* to `name`.
    ///
    /// When several stored keys normalize to the same name, the first one in
    /// insertion order wins; collisions are not deduplicated.
    pub fn get_normalized(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| normalize_key(key) == wanted)
            .map(|(_, value)| value.as_str())
    }

    /// Sets the value whose key normalizes to `name`, updating the first
    /// matching stored key in place. When no stored key matches, a new
    /// `X-`-prefixed key is derived from `name` (`apple_sort_order` becomes
    /// `X-APPLE-SORT-ORDER`). Returns the previous value, if any.
    pub fn set_normalized<V: Into<String>>(&mut self, name: &str, value: V) -> Option<String> {
        let wanted = name.to_ascii_lowercase();
        let value = value.into();
        match self
            .entries
            .iter()
            .position(|(key, _)| normalize_key(key) == wanted)
        {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((expand_name(name), value));
                None
            }
        }
    }
}

/// Normalizes a raw property key to an identifier-friendly name: parameters
/// are dropped, the name is lowercased, a leading `x-` is stripped and dashes
/// become underscores. `X-APPLE-SORT-ORDER;X-FOO=1` normalizes to
/// `apple_sort_order`.
pub fn normalize_key(raw: &str) -> String {
    let base = raw.split(';').next().unwrap_or(raw);
    let lowered = base.trim().to_ascii_lowercase();
    let stripped = lowered.strip_prefix("x-").unwrap_or(&lowered);
    stripped.replace('-', "_")
}

/// The inverse of [`normalize_key`] for newly created keys:
/// `apple_sort_order` expands to `X-APPLE-SORT-ORDER`.
fn expand_name(name: &str) -> String {
    format!("X-{}", name.trim().to_ascii_uppercase().replace('_', "-"))
}

impl FromIterator<(String, String)> for ExtraProperties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.set(key, value);
        }
        props
    }
}

impl From<Vec<(String, String)>> for ExtraProperties {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for ExtraProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtraProperties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropsVisitor;

        impl<'de> Visitor<'de> for PropsVisitor {
            type Value = ExtraProperties;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of iCal property keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut props = ExtraProperties::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    props.set(key, value);
                }
                Ok(props)
            }
        }

        deserializer.deserialize_map(PropsVisitor)
    }
}
