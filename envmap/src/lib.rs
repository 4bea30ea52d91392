//! Resolve process environment variables and dotenv files into dotted-path
//! configuration mappings.
//!
//! The engine turns a flat, loosely-formatted namespace of variable names
//! into a precise mapping of canonical attribute paths to raw string values.
//! Names are compared case-insensitively with `-` and `_` interchangeable
//! within path segments, environment variables take precedence over dotenv
//! entries, and the caller's [`EnvPolicy`] controls admission: allow-all or
//! an exclusive allow list, a raw-name prefix gate, explicit remaps and a
//! final deny list.
//!
//! The resolved [`PathMap`] keeps values as strings; typed extraction is the
//! validator's job, reached either through [`EnvSource::assemble`] or by
//! composing the source into a [`figment::Figment`] like any other provider.
//!
//! ```rust
//! use envmap::{EnvPolicy, EnvSource};
//!
//! # fn run() -> envmap::EnvmapResult<()> {
//! let source = EnvSource::new(
//!     EnvPolicy::allow_all()
//!         .with_prefix("APP_")
//!         .deny(["internal.token"]),
//! );
//! let mapping = source.build_mapping()?;
//! # let _ = mapping;
//! # Ok(())
//! # }
//! ```

mod dotenv;
mod error;
mod mapping;
mod path;
mod policy;
mod resolve;
mod snapshot;
mod source;

pub use error::{EnvmapError, EnvmapResult, InvalidField, ValidationFailure};
pub use mapping::PathMap;
pub use path::AttrPath;
pub use policy::EnvPolicy;
pub use source::EnvSource;
