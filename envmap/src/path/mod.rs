//! Canonical attribute paths.
//!
//! Environment variable names arrive in a loose format: `INNER.ATTR1-NAME`,
//! `inner.attr1_name` and `Inner.Attr1_Name` all address the same
//! configuration attribute. [`AttrPath`] is the canonical form of such a
//! name and the single source of truth for sameness across the crate: source
//! merging, allow/deny membership and remap lookups all compare through it.

use std::fmt;

/// A canonical, case- and separator-insensitive dotted attribute path.
///
/// Raw names are canonicalised by splitting on `.` into segments,
/// lower-casing each segment and folding `-` into `_`. Two raw names address
/// the same attribute exactly when their canonical forms are equal.
///
/// # Examples
///
/// ```rust
/// use envmap::AttrPath;
///
/// let a = AttrPath::normalize("INNER.ATTR1-NAME");
/// let b = AttrPath::normalize("inner.attr1_name");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "inner.attr1_name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrPath(String);

impl AttrPath {
    /// Canonicalises a raw name into an attribute path.
    ///
    /// Total over any input string: unknown or oddly-shaped names simply
    /// produce a path the downstream validator will never consult.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let canonical = raw
            .split('.')
            .map(canonical_segment)
            .collect::<Vec<_>>()
            .join(".");
        Self(canonical)
    }

    /// Returns the canonical dotted form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the path's segments in order.
    #[must_use = "iterators should be consumed"]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

/// Lower-cases a segment and folds `-` into `_`.
///
/// The separator is folded rather than stripped: `attr-name` and `attr_name`
/// are the same segment, but `attrname` is not.
fn canonical_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| if c == '-' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttrPath {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<String> for AttrPath {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}
