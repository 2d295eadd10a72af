//! Resolution of configuration keys against an environment snapshot.

use std::collections::BTreeMap;

use tracing::warn;

use crate::descriptor::Descriptor;
use crate::error::ConfigError;

/// Resolves configuration keys from an environment snapshot, falling back to
/// descriptor defaults.
///
/// The environment is captured once, by the caller, so resolution is a pure
/// lookup and tests never touch the process environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    defaults: BTreeMap<String, String>,
    env: BTreeMap<String, String>,
}

impl ConfigResolver {
    /// Creates a resolver over `env` with the defaults declared by `descriptor`.
    pub fn new(descriptor: &Descriptor, env: BTreeMap<String, String>) -> Self {
        Self {
            defaults: descriptor.defaults(),
            env,
        }
    }

    /// Creates a resolver over `env` using the built-in descriptor.
    pub fn with_builtin(env: BTreeMap<String, String>) -> Self {
        Self::new(&Descriptor::builtin(), env)
    }

    /// Returns the value explicitly set in the environment, if any.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Returns the environment value, or the descriptor default.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.lookup(key)
            .or_else(|| self.defaults.get(key).map(String::as_str))
    }

    /// Returns `true` if `key` is set in the environment.
    pub fn is_set(&self, key: &str) -> bool {
        self.env.contains_key(key)
    }

    /// Returns the non-empty environment value of `key`, falling back to
    /// `deprecated` with a warning.
    pub fn lookup_with_deprecated(&self, key: &str, deprecated: &str) -> Option<&str> {
        if let Some(v) = self.lookup(key) {
            return non_empty(v);
        }
        let v = self.lookup(deprecated)?;
        warn!("${deprecated} has been deprecated. Please use ${key} instead.");
        non_empty(v)
    }

    /// Resolves `key` as a boolean. Unset keys resolve to `None`.
    pub fn resolve_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.resolve(key) {
            None => Ok(None),
            Some(v) => parse_bool(v)
                .map(Some)
                .ok_or_else(|| ConfigError::InvalidBool {
                    key: key.to_string(),
                    value: v.to_string(),
                }),
        }
    }
}

fn non_empty(v: &str) -> Option<&str> {
    if v.trim().is_empty() {
        None
    } else {
        Some(v)
    }
}

/// Parses a boolean in the forms commonly used for environment flags.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Some(true),
        "false" | "f" | "0" | "no" => Some(false),
        _ => None,
    }
}
