//! Configuration for native-image builds.
//!
//! Configuration arrives as environment-style key/value pairs backed by a TOML
//! descriptor of defaults. This crate resolves those into the explicit
//! [`BuildConfig`] and [`DetectConfig`] structs consumed by the build core, so
//! nothing downstream reads process-wide state.

#![warn(missing_docs)]

pub mod build;
pub mod compression;
pub mod descriptor;
pub mod error;
pub mod keys;
pub mod resolve;

pub use build::{BuildConfig, DetectConfig};
pub use compression::CompressionMethod;
pub use descriptor::{load_descriptor, load_descriptor_from_str, ConfigurationDef, Descriptor};
pub use error::ConfigError;
pub use resolve::{parse_bool, ConfigResolver};
