//! Content-addressed layer caching.
//!
//! A layer is rebuilt only when its [`CacheKey`] changes. The key covers the
//! application file tree, the compiler arguments, the compression method and
//! the compiler version. Each layer holds a single slot that is overwritten on
//! every miss.

#![warn(missing_docs)]

pub mod contributor;
pub mod error;
pub mod key;
pub mod layer;
pub mod listing;
pub mod metadata;

pub use contributor::{Contribution, LayerContributor};
pub use error::CacheError;
pub use key::CacheKey;
pub use layer::{Layer, LayerFlags, Layers};
pub use listing::{EntryKind, FileListing, ListingEntry};
pub use metadata::LayerMetadata;
