//! Per-entry admission: remap, prefix gate, selection and deny.
//!
//! Entries are processed in the precedence order established by
//! [`crate::snapshot::merge_entries`]; when two surviving entries resolve to
//! the same target path the later one wins.

use crate::mapping::PathMap;
use crate::path::AttrPath;
use crate::policy::EnvPolicy;
use crate::snapshot::RawEntry;

/// Resolves merged entries into the final mapping under `policy`.
pub(crate) fn resolve_entries(entries: Vec<RawEntry>, policy: &EnvPolicy) -> PathMap {
    let mut mapping = PathMap::new();
    for entry in entries {
        let Some(target) = admission_path(&entry, policy) else {
            continue;
        };
        if policy.denies(&target) {
            tracing::trace!(name = %entry.name, path = %target, "entry denied");
            continue;
        }
        tracing::trace!(
            name = %entry.name,
            origin = ?entry.origin,
            path = %target,
            "entry admitted"
        );
        mapping.insert(target, entry.value);
    }
    mapping
}

/// Decides whether an entry is admitted and under which target path.
///
/// The order is fixed: the remap table is consulted first, against the raw
/// (unstripped) name; only non-remapped entries face the prefix gate and the
/// allow/allow_all selection. Deny is the caller's concern; it applies to
/// the returned target path regardless of the admission route.
fn admission_path(entry: &RawEntry, policy: &EnvPolicy) -> Option<AttrPath> {
    let raw_path = AttrPath::normalize(&entry.name);
    if let Some(target) = policy.remap_target(&raw_path) {
        return Some(target.clone());
    }

    let name = match policy.prefix() {
        Some(prefix) => entry.name.strip_prefix(prefix)?,
        None => entry.name.as_str(),
    };
    let candidate = AttrPath::normalize(name);
    policy.admits(&candidate).then_some(candidate)
}
