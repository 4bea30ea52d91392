//! Error types produced while resolving and assembling configuration.
//!
//! The resolution engine itself has exactly two failure modes: a dotenv file
//! that exists but cannot be read, and a malformed [`EnvPolicy`]. Schema
//! failures (missing or invalid fields) belong to the validation seam and
//! surface as a structured [`ValidationFailure`].
//!
//! [`EnvPolicy`]: crate::EnvPolicy

use std::fmt;
use std::path::PathBuf;

use figment::error::Kind;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type EnvmapResult<T> = Result<T, EnvmapError>;

/// Errors that can occur while building or assembling a configuration
/// mapping.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvmapError {
    /// A configured dotenv file exists but could not be read.
    #[error("failed to read dotenv file '{path}': {source}")]
    Dotenv {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The caller supplied a malformed policy.
    #[error("invalid policy: {message}")]
    Policy {
        /// Human-readable description of the contract violation.
        message: String,
    },

    /// The resolved mapping did not satisfy the target schema.
    #[error("configuration validation failed:\n{0}")]
    Validation(Box<ValidationFailure>),
}

impl EnvmapError {
    /// Constructs a policy contract-violation error.
    pub(crate) fn policy(message: impl Into<String>) -> Self {
        Self::Policy {
            message: message.into(),
        }
    }
}

/// A field the target schema required but the mapping could not satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    /// Dotted path of the offending field, empty when unknown.
    pub path: String,
    /// Description of why the value was rejected.
    pub message: String,
}

/// Structured outcome of a failed typed assembly.
///
/// Collects every extraction error reported by the validator, split into
/// fields that were absent and fields whose values were rejected.
///
/// # Examples
///
/// ```rust
/// use envmap::ValidationFailure;
///
/// let failure = ValidationFailure::from_figment(figment::Error::from(
///     "missing field `attr2`".to_owned(),
/// ));
/// assert_eq!(failure.missing, vec!["attr2".to_owned()]);
/// assert!(failure.invalid.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Dotted paths of required fields absent from the mapping.
    pub missing: Vec<String>,
    /// Fields whose values could not be interpreted.
    pub invalid: Vec<InvalidField>,
}

impl ValidationFailure {
    /// Classifies every error in a [`figment::Error`] chain.
    ///
    /// Missing fields are recognised both from the dedicated error kind and
    /// from serde's ``missing field `…` `` message form; everything else is
    /// recorded as an invalid field.
    #[must_use]
    pub fn from_figment(error: figment::Error) -> Self {
        let mut failure = Self::default();
        for err in error {
            failure.record(err);
        }
        failure
    }

    /// True when no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    fn record(&mut self, err: figment::Error) {
        let at = err.path.join(".");
        match err.kind {
            Kind::MissingField(name) => self.missing.push(qualified(&at, &name)),
            Kind::Message(message) => match missing_field_name(&message) {
                Some(name) => self.missing.push(qualified(&at, name)),
                None => self.invalid.push(InvalidField { path: at, message }),
            },
            kind => self.invalid.push(InvalidField {
                path: at,
                message: kind.to_string(),
            }),
        }
    }
}

/// Joins an error's path context with the reported field name.
fn qualified(at: &str, name: &str) -> String {
    if at.is_empty() {
        name.to_owned()
    } else {
        format!("{at}.{name}")
    }
}

/// Extracts the field name from serde's ``missing field `…` `` message.
fn missing_field_name(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'))
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for path in &self.missing {
            if !first {
                writeln!(f)?;
            }
            write!(f, "missing field `{path}`")?;
            first = false;
        }
        for field in &self.invalid {
            if !first {
                writeln!(f)?;
            }
            if field.path.is_empty() {
                write!(f, "invalid value: {}", field.message)?;
            } else {
                write!(f, "invalid field `{}`: {}", field.path, field.message)?;
            }
            first = false;
        }
        if first {
            write!(f, "no errors recorded")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationFailure> for EnvmapError {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(Box::new(failure))
    }
}

#[cfg(test)]
mod tests;
