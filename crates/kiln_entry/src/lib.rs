//! Entry point resolution for JVM applications.
//!
//! An application is compiled either from an exploded directory described by
//! `META-INF/MANIFEST.MF` ([`ClassEntry`]) or from a single jar file located by
//! a glob ([`JarEntry`]). Both answer the same three questions through
//! [`EntryPoint`]: what the program is called, what its classpath is, and which
//! arguments name it on the compiler command line.

#![warn(missing_docs)]

pub mod class;
pub mod error;
pub mod jar;
pub mod manifest;

use std::path::Path;

pub use class::ClassEntry;
pub use error::EntryError;
pub use jar::JarEntry;
pub use manifest::Manifest;

/// The capability shared by every entry variant.
pub trait EntryPoint {
    /// The program name. Fails if no entry point can be determined.
    fn name(&self) -> Result<&str, EntryError>;

    /// The classpath handed to the compiler.
    fn classpath(&self) -> String;

    /// Arguments appended after the classpath to name the entry point.
    fn trailing_arguments(&self) -> Result<Vec<String>, EntryError>;
}

/// The resolved entry point of an application.
#[derive(Debug)]
pub enum MainEntry {
    /// Exploded application driven by its manifest.
    Class(ClassEntry),
    /// Single jar located by a glob.
    Jar(JarEntry),
}

impl MainEntry {
    /// Chooses and resolves the entry variant.
    ///
    /// A configured `jar_pattern` selects [`JarEntry`]. Otherwise an application
    /// with a manifest is a [`ClassEntry`], and one without falls back to a jar
    /// located by `default_jar_pattern`.
    pub fn select(
        app_root: &Path,
        manifest: Option<Manifest>,
        jar_pattern: Option<&str>,
        default_jar_pattern: &str,
        classpath_override: Option<&str>,
    ) -> Result<Self, EntryError> {
        match (jar_pattern, manifest) {
            (Some(pattern), _) => Ok(Self::Jar(JarEntry::resolve(app_root, pattern)?)),
            (None, Some(manifest)) => Ok(Self::Class(ClassEntry::new(
                app_root,
                manifest,
                classpath_override.map(str::to_string),
            ))),
            (None, None) => Ok(Self::Jar(JarEntry::resolve(app_root, default_jar_pattern)?)),
        }
    }
}

impl EntryPoint for MainEntry {
    fn name(&self) -> Result<&str, EntryError> {
        match self {
            Self::Class(e) => e.name(),
            Self::Jar(e) => e.name(),
        }
    }

    fn classpath(&self) -> String {
        match self {
            Self::Class(e) => e.classpath(),
            Self::Jar(e) => e.classpath(),
        }
    }

    fn trailing_arguments(&self) -> Result<Vec<String>, EntryError> {
        match self {
            Self::Class(e) => e.trailing_arguments(),
            Self::Jar(e) => e.trailing_arguments(),
        }
    }
}
