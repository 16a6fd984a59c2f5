//! Ordered, multi-valued query parameters.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::codec;

/// Query parameters as an ordered log of occurrences.
///
/// Viewed per name, every name maps to its values in insertion order, and
/// names are listed by first appearance. Rendering follows the occurrence
/// order, so `x=1&y&x=2` comes back unchanged. A name with no values is kept
/// as a single bare occurrence and renders as `name`; an empty string value
/// renders as `name=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    occurrences: Vec<(String, Option<String>)>,
}

impl Parameters {
    pub const fn new() -> Self {
        Self {
            occurrences: Vec::new(),
        }
    }

    /// Values of `name` in insertion order; empty for a bare name.
    pub fn get(&self, name: &str) -> Option<Vec<&str>> {
        if !self.contains(name) {
            return None;
        }
        Some(self.values_of(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.occurrences.iter().any(|(key, _)| key == name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Distinct names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.occurrences
            .iter()
            .enumerate()
            .filter(|(index, (key, _))| {
                !self.occurrences[..*index].iter().any(|(seen, _)| seen == key)
            })
            .map(|(_, (key, _))| key.as_str())
    }

    /// `(name, values)` pairs in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.names().map(|name| (name, self.values_of(name)))
    }

    fn values_of(&self, name: &str) -> Vec<&str> {
        self.occurrences
            .iter()
            .filter(|(key, _)| key == name)
            .filter_map(|(_, value)| value.as_deref())
            .collect()
    }

    /// Ensures `name` exists and appends `value` if given. The first value
    /// takes the place of a bare occurrence.
    pub(crate) fn add(&mut self, name: &str, value: Option<&str>) {
        let bare = self
            .occurrences
            .iter()
            .position(|(key, value)| key == name && value.is_none());
        match (value, bare) {
            (Some(value), Some(index)) => self.occurrences[index].1 = Some(value.to_string()),
            (Some(value), None) => self
                .occurrences
                .push((name.to_string(), Some(value.to_string()))),
            (None, _) if self.contains(name) => {}
            (None, _) => self.occurrences.push((name.to_string(), None)),
        }
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.occurrences.retain(|(key, _)| key != name);
    }

    pub(crate) fn clear(&mut self) {
        self.occurrences.clear();
    }

    /// Adds everything from a query string; a single leading `?` is skipped.
    pub(crate) fn add_query(&mut self, query: &str, decode: bool) {
        let query = query.trim();
        let query = query.strip_prefix('?').unwrap_or(query);
        let text = |raw: &str| {
            if decode {
                codec::decode(raw)
            } else {
                raw.to_string()
            }
        };
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            match pair.split_once('=') {
                Some((name, value)) => self.add(&text(name), Some(&text(value))),
                None => self.add(&text(pair), None),
            }
        }
    }

    /// Renders `name=value` pairs joined by `&`, without the leading `?`.
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.occurrences {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&codec::encode(name));
            if let Some(value) = value {
                out.push('=');
                out.push_str(&codec::encode(value));
            }
        }
        out
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, values) in self.iter() {
            map.serialize_entry(name, &values)?;
        }
        map.end()
    }
}
