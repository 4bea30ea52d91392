//! Dotenv file loading and line parsing.
//!
//! The format is deliberately dumb: each non-blank line is `KEY=VALUE`,
//! split at the first `=` (the value may contain further `=` characters).
//! There is no quoting, escaping, interpolation or comment syntax; lines
//! without `=` are skipped. A configured file that does not exist is not an
//! error; the source is simply absent.

use std::path::Path;

use crate::error::{EnvmapError, EnvmapResult};
use crate::snapshot::{Origin, RawEntry};

/// Reads and parses a dotenv file.
///
/// Returns `Ok(None)` when the file does not exist. Reading an existing file
/// that fails (permissions, encoding) is an [`EnvmapError::Dotenv`].
pub(crate) fn load_dotenv(path: &Path) -> EnvmapResult<Option<Vec<RawEntry>>> {
    if !path.is_file() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(path).map_err(|source| EnvmapError::Dotenv {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parse_dotenv(&data)))
}

/// Parses dotenv content into raw entries, preserving line order.
pub(crate) fn parse_dotenv(data: &str) -> Vec<RawEntry> {
    data.lines().filter_map(parse_line).collect()
}

/// Parses a single line, tolerating a trailing `\r` from CRLF files.
fn parse_line(line: &str) -> Option<RawEntry> {
    let content = line.strip_suffix('\r').unwrap_or(line);
    if content.trim().is_empty() {
        return None;
    }
    let Some((key, value)) = content.split_once('=') else {
        tracing::debug!(line = content, "ignoring dotenv line without a key/value delimiter");
        return None;
    };
    Some(RawEntry {
        name: key.to_owned(),
        value: value.to_owned(),
        origin: Origin::Dotenv,
    })
}
