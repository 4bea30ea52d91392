//! Caller-supplied filtering and renaming policy.
//!
//! An [`EnvPolicy`] decides which entries of the merged snapshot contribute
//! to the resolved mapping and under which attribute path. The recognised
//! knobs are exactly `allow_all`, `allow`, `deny`, `prefix` and `remap`;
//! there are no hidden defaults beyond "empty set" and "unset".

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{EnvmapError, EnvmapResult};
use crate::path::AttrPath;

/// Filtering and renaming policy for environment resolution.
///
/// Policies are immutable values built through consuming builder methods.
/// Selection modes compose in a fixed order: a non-empty allow list
/// supersedes [`allow_all`](Self::allow_all) for non-remapped entries, remap
/// admits its keys unconditionally, and deny always applies last.
///
/// # Examples
///
/// ```rust
/// use envmap::EnvPolicy;
///
/// let policy = EnvPolicy::allow_all()
///     .with_prefix("CONFIG_")
///     .deny(["secret"]);
/// let _ = policy;
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvPolicy {
    allow_all: bool,
    allow: BTreeSet<AttrPath>,
    deny: BTreeSet<AttrPath>,
    prefix: Option<String>,
    remap: BTreeMap<AttrPath, AttrPath>,
}

impl EnvPolicy {
    /// Creates a policy that admits nothing except remapped entries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_all: false,
            allow: BTreeSet::new(),
            deny: BTreeSet::new(),
            prefix: None,
            remap: BTreeMap::new(),
        }
    }

    /// Creates a policy that admits every entry.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            allow_all: true,
            allow: BTreeSet::new(),
            deny: BTreeSet::new(),
            prefix: None,
            remap: BTreeMap::new(),
        }
    }

    /// Adds attribute paths to the allow list.
    ///
    /// A non-empty allow list is an exclusive selection: only its members are
    /// admitted, regardless of `allow_all`. Allow entries are plain attribute
    /// paths and are never prefix-qualified.
    #[must_use]
    pub fn allow<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<AttrPath>,
    {
        self.allow.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds attribute paths to the deny list.
    ///
    /// Deny is evaluated against the final target path and discards entries
    /// admitted by any route, remap included.
    #[must_use]
    pub fn deny<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<AttrPath>,
    {
        self.deny.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Requires raw names to start with `prefix`, compared case-sensitively.
    ///
    /// The prefix is stripped before a name is normalised into a path.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Routes the raw name `key` to the attribute path `target`.
    ///
    /// Remapped entries bypass the prefix gate and both selection modes; only
    /// deny can still discard them.
    #[must_use]
    pub fn remap(mut self, key: impl Into<AttrPath>, target: impl Into<AttrPath>) -> Self {
        self.remap.insert(key.into(), target.into());
        self
    }

    /// Rejects contract violations before any resolution work happens.
    pub(crate) fn validate(&self) -> EnvmapResult<()> {
        if self.prefix.as_deref().is_some_and(str::is_empty) {
            return Err(EnvmapError::policy("prefix must not be empty"));
        }
        for path in &self.allow {
            ensure_path("allow", path)?;
        }
        for path in &self.deny {
            ensure_path("deny", path)?;
        }
        for (key, target) in &self.remap {
            ensure_path("remap key", key)?;
            ensure_path("remap target", target)?;
        }
        Ok(())
    }

    /// The configured raw prefix, if any.
    pub(crate) fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The remap target for a normalised raw name, if one is configured.
    pub(crate) fn remap_target(&self, raw_path: &AttrPath) -> Option<&AttrPath> {
        self.remap.get(raw_path)
    }

    /// Whether the candidate path passes the allow/allow_all selection.
    pub(crate) fn admits(&self, candidate: &AttrPath) -> bool {
        if self.allow.is_empty() {
            self.allow_all
        } else {
            self.allow.contains(candidate)
        }
    }

    /// Whether the target path is denied.
    pub(crate) fn denies(&self, target: &AttrPath) -> bool {
        self.deny.contains(target)
    }
}

/// Rejects empty paths and paths containing an empty segment.
fn ensure_path(context: &str, path: &AttrPath) -> EnvmapResult<()> {
    if path.as_str().is_empty() || path.segments().any(str::is_empty) {
        return Err(EnvmapError::policy(format!(
            "{context} path '{path}' must not contain empty segments"
        )));
    }
    Ok(())
}
