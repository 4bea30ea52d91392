//! The resolved attribute-path mapping.
//!
//! A [`PathMap`] is the terminal artifact of a resolution call: canonical
//! dotted paths mapped to raw string values. It is also the exact shape the
//! validation collaborator consumes: the [`Provider`] implementation nests
//! the dotted paths into a value tree that figment can extract a typed
//! configuration from. Scalar interpretation of the raw strings happens
//! there, at the validator seam, never in the resolution engine.

use std::collections::BTreeMap;

use figment::value::{Dict, Tag, Value};
use figment::{Metadata, Profile, Provider};

use crate::path::AttrPath;

/// Resolved mapping of canonical attribute paths to raw string values.
///
/// Built fresh by every resolution call; keys are unique and later writers
/// win during construction.
///
/// # Examples
///
/// ```rust
/// use envmap::{AttrPath, PathMap};
///
/// let mapping: PathMap = [("INNER.ATTR1-NAME", "1"), ("ATTR2", "2")]
///     .into_iter()
///     .map(|(k, v)| (AttrPath::normalize(k), v.to_owned()))
///     .collect();
/// assert_eq!(mapping.get("inner.attr1_name"), Some("1"));
/// assert_eq!(mapping.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap(BTreeMap<AttrPath, String>);

impl PathMap {
    /// Creates an empty mapping.
    pub(crate) const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a value, overwriting any earlier writer of the same path.
    pub(crate) fn insert(&mut self, path: AttrPath, value: String) {
        self.0.insert(path, value);
    }

    /// Looks up a value; the query is canonicalised before comparison.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(&AttrPath::normalize(path)).map(String::as_str)
    }

    /// Number of resolved paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no entry was admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the resolved paths and values in path order.
    #[must_use = "iterators should be consumed"]
    pub fn iter(&self) -> impl Iterator<Item = (&AttrPath, &str)> {
        self.0.iter().map(|(path, value)| (path, value.as_str()))
    }
}

impl FromIterator<(AttrPath, String)> for PathMap {
    fn from_iter<I: IntoIterator<Item = (AttrPath, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PathMap {
    type Item = (AttrPath, String);
    type IntoIter = std::collections::btree_map::IntoIter<AttrPath, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Provider for PathMap {
    fn metadata(&self) -> Metadata {
        Metadata::named("resolved environment mapping")
    }

    fn data(&self) -> Result<figment::value::Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        for (path, value) in &self.0 {
            let segments: Vec<&str> = path.segments().collect();
            insert_nested(&mut dict, &segments, interpret_scalar(value));
        }
        Ok(Profile::Default.collect(dict))
    }
}

/// Inserts a leaf value at a nested dotted path.
///
/// Sibling paths sharing a parent segment merge into the same intermediate
/// dictionary; a scalar sitting where a deeper path needs a dictionary is
/// replaced, keeping the last writer.
fn insert_nested(dict: &mut Dict, segments: &[&str], leaf: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        dict.insert((*head).to_owned(), leaf);
        return;
    }
    let slot = dict
        .entry((*head).to_owned())
        .or_insert_with(|| Value::Dict(Tag::Default, Dict::new()));
    if !matches!(slot, Value::Dict(..)) {
        *slot = Value::Dict(Tag::Default, Dict::new());
    }
    if let Value::Dict(_, child) = slot {
        insert_nested(child, rest, leaf);
    }
}

/// Interprets a raw string as a scalar value, falling back to the string
/// itself when it parses as nothing more specific.
fn interpret_scalar(raw: &str) -> Value {
    raw.parse().unwrap_or_else(|_| Value::from(raw.to_owned()))
}
