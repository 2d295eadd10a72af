//! Configuration descriptor listing recognised keys and their defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Descriptor compiled into the crate, used when none is supplied.
pub const BUILTIN_DESCRIPTOR: &str = r#"
[[configurations]]
name = "BP_NATIVE_IMAGE"
description = "enable native image build"
build = true

[[configurations]]
name = "BP_NATIVE_IMAGE_BUILD_ARGUMENTS"
description = "arguments to pass to the native-image command"
build = true

[[configurations]]
name = "BP_NATIVE_IMAGE_BUILD_ARGUMENTS_FILE"
description = "a file with arguments to pass to the native-image command"
build = true

[[configurations]]
name = "BP_NATIVE_IMAGE_BUILT_ARTIFACT"
default = "target/*.jar"
description = "the built application artifact explicitly, required if building from a JAR"
build = true

[[configurations]]
name = "BP_BINARY_COMPRESSION_METHOD"
default = "none"
description = "compression mechanism used to reduce binary size: none, upx, gzexe"
build = true
"#;

/// A set of configuration definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Descriptor {
    /// Declared configuration keys.
    #[serde(default)]
    pub configurations: Vec<ConfigurationDef>,
}

/// A single configuration key declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationDef {
    /// The environment-style key.
    pub name: String,
    /// Value used when the key is not set.
    #[serde(default)]
    pub default: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the key applies at build time.
    #[serde(default)]
    pub build: bool,
    /// Whether the key applies at launch time.
    #[serde(default)]
    pub launch: bool,
}

impl Descriptor {
    /// Parses the built-in descriptor.
    pub fn builtin() -> Self {
        // Parsing is covered by `builtin_descriptor_parses`.
        load_descriptor_from_str(BUILTIN_DESCRIPTOR).unwrap_or_default()
    }

    /// Returns the defaults declared by this descriptor, keyed by name.
    pub fn defaults(&self) -> BTreeMap<String, String> {
        self.configurations
            .iter()
            .filter_map(|c| c.default.clone().map(|d| (c.name.clone(), d)))
            .collect()
    }
}

/// Loads a descriptor from a TOML file.
pub fn load_descriptor(path: &Path) -> Result<Descriptor, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_descriptor_from_str(&content)
}

/// Parses and validates a descriptor from a string.
pub fn load_descriptor_from_str(content: &str) -> Result<Descriptor, ConfigError> {
    let descriptor: Descriptor =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_descriptor(&descriptor)?;
    Ok(descriptor)
}

fn validate_descriptor(descriptor: &Descriptor) -> Result<(), ConfigError> {
    let mut seen = std::collections::BTreeSet::new();
    for def in &descriptor.configurations {
        if def.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "configuration with empty name".to_string(),
            ));
        }
        if !seen.insert(def.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate configuration '{}'",
                def.name
            )));
        }
    }
    Ok(())
}
