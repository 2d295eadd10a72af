//! Post-compile binary compression methods.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// How the produced binary is compressed after compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompressionMethod {
    /// No compression.
    #[default]
    None,
    /// Compressed in place by `upx`, which overwrites the binary.
    InPlace,
    /// Compressed by `gzexe`, which leaves a `~`-suffixed backup to be removed.
    WithBackup,
}

impl CompressionMethod {
    /// Resolves a configured value, degrading unknown values to [`CompressionMethod::None`]
    /// with a warning. `None` input means unset.
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::None;
        };
        match raw.parse() {
            Ok(method) => method,
            Err(UnknownCompressionMethod(value)) => {
                warn!(
                    "Requested compression method [{value}] is unknown, no compression will be performed"
                );
                Self::None
            }
        }
    }

    /// The identifier recorded in configuration and cache metadata.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::InPlace => "upx",
            Self::WithBackup => "gzexe",
        }
    }

    /// The external tool invoked for this method, if any.
    pub fn tool(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::InPlace => Some("upx"),
            Self::WithBackup => Some("gzexe"),
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// A compression identifier that is not one of `none`, `upx` or `gzexe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCompressionMethod(pub String);

impl fmt::Display for UnknownCompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown compression method '{}'", self.0)
    }
}

impl std::error::Error for UnknownCompressionMethod {}

impl FromStr for CompressionMethod {
    type Err = UnknownCompressionMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" | "" => Ok(Self::None),
            "upx" => Ok(Self::InPlace),
            "gzexe" => Ok(Self::WithBackup),
            other => Err(UnknownCompressionMethod(other.to_string())),
        }
    }
}
