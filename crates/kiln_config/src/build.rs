//! Explicit build and detect configuration resolved from a [`ConfigResolver`].

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::compression::CompressionMethod;
use crate::error::ConfigError;
use crate::keys;
use crate::resolve::ConfigResolver;

/// Jar pattern used when neither the environment nor the descriptor sets one.
pub const DEFAULT_JAR_PATTERN: &str = "target/*.jar";

/// Everything the native-image build consumes, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Inline user arguments, shell-word encoded.
    pub arguments: Option<String>,
    /// File of user arguments, shell-word encoded.
    pub arguments_file: Option<PathBuf>,
    /// Jar glob explicitly configured by the user.
    pub jar_pattern: Option<String>,
    /// Jar glob used when the application has no manifest and none was configured.
    pub default_jar_pattern: String,
    /// Post-compile compression.
    pub compression: CompressionMethod,
    /// Classpath override for class-entry builds.
    pub classpath: Option<String>,
    /// Identifier of the base image being built for.
    pub stack_id: String,
    /// Extra environment set on the compiler process only.
    pub compiler_env: Vec<(String, String)>,
}

impl BuildConfig {
    /// Resolves the build configuration for the application at `app_root`.
    ///
    /// When no argument file is configured, an argument file embedded in the
    /// application at `META-INF/native-image/argfile` is picked up instead.
    pub fn resolve(
        resolver: &ConfigResolver,
        app_root: &Path,
        stack_id: &str,
    ) -> Result<Self, ConfigError> {
        let arguments = resolver
            .lookup_with_deprecated(keys::BUILD_ARGUMENTS, keys::DEPRECATED_BUILD_ARGUMENTS)
            .map(str::to_string);

        let arguments_file = match resolver.lookup(keys::BUILD_ARGUMENTS_FILE) {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => {
                let embedded = app_root.join(keys::EMBEDDED_ARGFILE);
                if embedded.try_exists()? {
                    debug!("using embedded argument file {}", embedded.display());
                    Some(embedded)
                } else {
                    None
                }
            }
        };

        let jar_pattern = resolver
            .lookup(keys::BUILT_ARTIFACT)
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string);
        let default_jar_pattern = resolver
            .resolve(keys::BUILT_ARTIFACT)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_JAR_PATTERN)
            .to_string();

        let compression = CompressionMethod::resolve(resolver.lookup(keys::COMPRESSION_METHOD));

        let classpath = resolver
            .lookup(keys::CLASSPATH)
            .filter(|cp| !cp.is_empty())
            .map(str::to_string);

        let mut compiler_env = Vec::new();
        if !resolver.is_set(keys::MODULE_SYSTEM) {
            compiler_env.push((keys::MODULE_SYSTEM.to_string(), "false".to_string()));
        }

        Ok(Self {
            arguments,
            arguments_file,
            jar_pattern,
            default_jar_pattern,
            compression,
            classpath,
            stack_id: stack_id.to_string(),
            compiler_env,
        })
    }
}

/// Configuration consumed by detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectConfig {
    /// Native compilation was requested.
    pub native_image_enabled: bool,
    /// Requested compression method.
    pub compression: CompressionMethod,
}

impl DetectConfig {
    /// Resolves detection configuration. An unparsable `BP_NATIVE_IMAGE` is an error.
    pub fn resolve(resolver: &ConfigResolver) -> Result<Self, ConfigError> {
        let native_image_enabled = if resolver.is_set(keys::NATIVE_IMAGE) {
            resolver.resolve_bool(keys::NATIVE_IMAGE)?.unwrap_or(false)
        } else if resolver.is_set(keys::DEPRECATED_NATIVE_IMAGE) {
            warn!(
                "${} has been deprecated. Please use ${} instead.",
                keys::DEPRECATED_NATIVE_IMAGE,
                keys::NATIVE_IMAGE
            );
            true
        } else {
            false
        };

        // Unknown values are reported by the build.
        let compression = resolver
            .lookup(keys::COMPRESSION_METHOD)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Ok(Self {
            native_image_enabled,
            compression,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn resolver(pairs: &[(&str, &str)]) -> ConfigResolver {
        ConfigResolver::with_builtin(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn defaults_with_empty_environment() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BuildConfig::resolve(&resolver(&[]), dir.path(), "stack").unwrap();
        assert_eq!(cfg.arguments, None);
        assert_eq!(cfg.arguments_file, None);
        assert_eq!(cfg.jar_pattern, None);
        assert_eq!(cfg.default_jar_pattern, "target/*.jar");
        assert_eq!(cfg.compression, CompressionMethod::None);
        assert_eq!(cfg.classpath, None);
        assert_eq!(cfg.stack_id, "stack");
        assert_eq!(
            cfg.compiler_env,
            vec![(keys::MODULE_SYSTEM.to_string(), "false".to_string())]
        );
    }

    #[test]
    fn explicit_values() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BuildConfig::resolve(
            &resolver(&[
                (keys::BUILD_ARGUMENTS, "-Xmx=1g"),
                (keys::BUILD_ARGUMENTS_FILE, "/tmp/args.txt"),
                (keys::BUILT_ARTIFACT, "build/libs/*.jar"),
                (keys::COMPRESSION_METHOD, "gzexe"),
                (keys::CLASSPATH, "/cp"),
                (keys::MODULE_SYSTEM, "true"),
            ]),
            dir.path(),
            keys::TINY_STACK_ID,
        )
        .unwrap();
        assert_eq!(cfg.arguments.as_deref(), Some("-Xmx=1g"));
        assert_eq!(cfg.arguments_file, Some(PathBuf::from("/tmp/args.txt")));
        assert_eq!(cfg.jar_pattern.as_deref(), Some("build/libs/*.jar"));
        assert_eq!(cfg.default_jar_pattern, "build/libs/*.jar");
        assert_eq!(cfg.compression, CompressionMethod::WithBackup);
        assert_eq!(cfg.classpath.as_deref(), Some("/cp"));
        assert!(cfg.compiler_env.is_empty());
    }

    #[test]
    fn deprecated_arguments_key() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BuildConfig::resolve(
            &resolver(&[(keys::DEPRECATED_BUILD_ARGUMENTS, "--verbose")]),
            dir.path(),
            "stack",
        )
        .unwrap();
        assert_eq!(cfg.arguments.as_deref(), Some("--verbose"));
    }

    #[test]
    fn unknown_compression_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BuildConfig::resolve(
            &resolver(&[(keys::COMPRESSION_METHOD, "brotli")]),
            dir.path(),
            "stack",
        )
        .unwrap();
        assert_eq!(cfg.compression, CompressionMethod::None);
    }

    #[test]
    fn embedded_argfile_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let argfile = dir.path().join("META-INF").join("native-image").join("argfile");
        std::fs::create_dir_all(argfile.parent().unwrap()).unwrap();
        std::fs::write(&argfile, "--enable-http").unwrap();

        let cfg = BuildConfig::resolve(&resolver(&[]), dir.path(), "stack").unwrap();
        assert_eq!(cfg.arguments_file, Some(argfile));
    }

    #[test]
    fn configured_argfile_wins_over_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let argfile = dir.path().join("META-INF").join("native-image").join("argfile");
        std::fs::create_dir_all(argfile.parent().unwrap()).unwrap();
        std::fs::write(&argfile, "--enable-http").unwrap();

        let cfg = BuildConfig::resolve(
            &resolver(&[(keys::BUILD_ARGUMENTS_FILE, "/custom")]),
            dir.path(),
            "stack",
        )
        .unwrap();
        assert_eq!(cfg.arguments_file, Some(PathBuf::from("/custom")));
    }

    #[test]
    fn detect_disabled_by_default() {
        let cfg = DetectConfig::resolve(&resolver(&[])).unwrap();
        assert!(!cfg.native_image_enabled);
        assert_eq!(cfg.compression, CompressionMethod::None);
    }

    #[test]
    fn detect_enabled_flag() {
        let cfg = DetectConfig::resolve(&resolver(&[(keys::NATIVE_IMAGE, "true")])).unwrap();
        assert!(cfg.native_image_enabled);
        let cfg = DetectConfig::resolve(&resolver(&[(keys::NATIVE_IMAGE, "false")])).unwrap();
        assert!(!cfg.native_image_enabled);
    }

    #[test]
    fn detect_deprecated_presence_enables() {
        let cfg =
            DetectConfig::resolve(&resolver(&[(keys::DEPRECATED_NATIVE_IMAGE, "")])).unwrap();
        assert!(cfg.native_image_enabled);
    }

    #[test]
    fn detect_invalid_bool_errors() {
        let err = DetectConfig::resolve(&resolver(&[(keys::NATIVE_IMAGE, "sure")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { .. }));
    }

    #[test]
    fn detect_upx() {
        let cfg =
            DetectConfig::resolve(&resolver(&[(keys::COMPRESSION_METHOD, "upx")])).unwrap();
        assert_eq!(cfg.compression, CompressionMethod::InPlace);
    }
}
