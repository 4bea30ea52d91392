//! Source snapshots and cross-source precedence merging.
//!
//! Both sources are read exactly once per resolution call: the process
//! environment is snapshotted from `std::env` and the dotenv file (when
//! configured and present) is parsed by [`crate::dotenv`]. Merging applies
//! the precedence rule: for any two entries naming the same attribute path,
//! the process entry wins.

use std::collections::{HashMap, HashSet};

use crate::path::AttrPath;

/// Which source an entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// Read from the process environment.
    Process,
    /// Read from the configured dotenv file.
    Dotenv,
}

/// A single key/value pair as read from a source.
///
/// The name is kept raw: prefix matching and remap lookup downstream operate
/// on the name as originally written, not on its canonical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawEntry {
    /// The key exactly as written in the source.
    pub(crate) name: String,
    /// The value as a raw string.
    pub(crate) value: String,
    /// The source the entry was read from.
    pub(crate) origin: Origin,
}

/// Snapshots the current process environment.
///
/// Entries whose name or value is not valid UTF-8 are skipped; the engine
/// only ever sees valid strings.
pub(crate) fn process_snapshot() -> Vec<RawEntry> {
    std::env::vars_os()
        .filter_map(|(key, text)| match (key.into_string(), text.into_string()) {
            (Ok(name), Ok(value)) => Some(RawEntry {
                name,
                value,
                origin: Origin::Process,
            }),
            _ => None,
        })
        .collect()
}

/// Merges the dotenv snapshot under the process snapshot.
///
/// With no dotenv source the process snapshot is returned unchanged.
/// Otherwise dotenv entries are deduplicated by attribute path (the last
/// line wins), any dotenv entry whose path collides with a process entry is
/// dropped, and the process entries are appended. The surviving entry for a
/// contested path therefore carries the process entry's own raw name, and
/// process entries order after dotenv entries so later-wins insertion
/// downstream also favours the process source.
pub(crate) fn merge_entries(
    process: Vec<RawEntry>,
    dotenv: Option<Vec<RawEntry>>,
) -> Vec<RawEntry> {
    let Some(file_entries) = dotenv else {
        return process;
    };

    let mut merged: Vec<RawEntry> = Vec::new();
    let mut slots: HashMap<AttrPath, usize> = HashMap::new();
    for entry in file_entries {
        let path = AttrPath::normalize(&entry.name);
        match slots.get(&path) {
            Some(&slot) => {
                if let Some(existing) = merged.get_mut(slot) {
                    *existing = entry;
                }
            }
            None => {
                slots.insert(path, merged.len());
                merged.push(entry);
            }
        }
    }

    let taken: HashSet<AttrPath> = process
        .iter()
        .map(|entry| AttrPath::normalize(&entry.name))
        .collect();
    merged.retain(|entry| {
        let keep = !taken.contains(&AttrPath::normalize(&entry.name));
        if !keep {
            tracing::trace!(name = %entry.name, "dotenv entry shadowed by process environment");
        }
        keep
    });
    merged.extend(process);
    merged
}
