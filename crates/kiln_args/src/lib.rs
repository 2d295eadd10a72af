//! Assembly of the native-image compiler command line.
//!
//! Arguments come from four sources applied in a fixed order by
//! [`ArgumentPipeline`]: platform baseline flags, a user argument file, inline
//! user arguments, and finally the flags derived from the entry point. User
//! sources replace earlier arguments that share a key (the text before `=`).

#![warn(missing_docs)]

pub mod error;
pub mod merge;
pub mod pipeline;
pub mod source;
pub mod tokenize;

pub use error::ArgsError;
pub use merge::{arg_key, contains_arg, override_merge, strip_jar};
pub use pipeline::ArgumentPipeline;
pub use source::{
    ArgumentSource, BaselineArguments, EntryPointArguments, UserArguments, UserFileArguments,
};
pub use tokenize::tokenize;

/// An ordered compiler command line.
pub type ArgumentVector = Vec<String>;
