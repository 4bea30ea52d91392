//! The public entry point: environment plus optional dotenv file.

use std::path::PathBuf;

use figment::value::Dict;
use figment::{Figment, Metadata, Profile, Provider};
use serde::de::DeserializeOwned;

use crate::dotenv::load_dotenv;
use crate::error::{EnvmapError, EnvmapResult, ValidationFailure};
use crate::mapping::PathMap;
use crate::policy::EnvPolicy;
use crate::resolve::resolve_entries;
use crate::snapshot::{merge_entries, process_snapshot};

/// A configuration source backed by the process environment and an optional
/// dotenv file.
///
/// Every call re-reads both sources; nothing is cached, so a source may be
/// invoked repeatedly and will reflect environment changes between calls.
///
/// # Examples
///
/// ```rust
/// use envmap::{EnvPolicy, EnvSource};
///
/// # fn run() -> envmap::EnvmapResult<()> {
/// let source = EnvSource::new(EnvPolicy::allow_all().with_prefix("CONFIG_"))
///     .with_dotenv(".env");
/// let mapping = source.build_mapping()?;
/// if let Some(level) = mapping.get("log.level") {
///     println!("log level: {level}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EnvSource {
    policy: EnvPolicy,
    dotenv: Option<PathBuf>,
}

impl EnvSource {
    /// Creates a source reading the process environment under `policy`.
    #[must_use]
    pub const fn new(policy: EnvPolicy) -> Self {
        Self {
            policy,
            dotenv: None,
        }
    }

    /// Also reads the dotenv file at `path`.
    ///
    /// Absence of the file is tolerated and degrades to "no file source";
    /// environment variables always take precedence over file entries
    /// naming the same attribute path.
    #[must_use]
    pub fn with_dotenv(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv = Some(path.into());
        self
    }

    /// Resolves both sources into a mapping of attribute paths to values.
    ///
    /// # Errors
    ///
    /// Returns [`EnvmapError::Policy`] for a malformed policy and
    /// [`EnvmapError::Dotenv`] when a configured dotenv file exists but
    /// cannot be read.
    pub fn build_mapping(&self) -> EnvmapResult<PathMap> {
        self.policy.validate()?;
        let file_entries = self
            .dotenv
            .as_deref()
            .map(load_dotenv)
            .transpose()?
            .flatten();
        let merged = merge_entries(process_snapshot(), file_entries);
        Ok(resolve_entries(merged, &self.policy))
    }

    /// Resolves both sources and extracts a typed configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`build_mapping`](Self::build_mapping) failures; schema
    /// failures surface as [`EnvmapError::Validation`] carrying the missing
    /// and invalid fields.
    pub fn assemble<T: DeserializeOwned>(&self) -> EnvmapResult<T> {
        let mapping = self.build_mapping()?;
        Figment::from(mapping)
            .extract()
            .map_err(|error| ValidationFailure::from_figment(error).into())
    }
}

impl Provider for EnvSource {
    fn metadata(&self) -> Metadata {
        Metadata::named("environment and dotenv source")
    }

    fn data(&self) -> Result<figment::value::Map<Profile, Dict>, figment::Error> {
        let mapping = self
            .build_mapping()
            .map_err(|error| figment::Error::from(error.to_string()))?;
        mapping.data()
    }
}

#[cfg(test)]
mod tests;
