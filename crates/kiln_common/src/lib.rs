//! Shared foundational types used across the kiln native-image toolchain.
//!
//! This crate provides the content digest used for cache invalidation and the
//! platform path-list helpers used when composing classpaths.

#![warn(missing_docs)]

pub mod hash;
pub mod path_list;

pub use hash::{ContentHash, ParseContentHashError};
pub use path_list::{join_path_list, PATH_LIST_SEPARATOR};
