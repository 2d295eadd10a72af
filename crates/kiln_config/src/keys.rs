//! Recognised configuration keys and well-known values.

/// Enables native compilation during detection.
pub const NATIVE_IMAGE: &str = "BP_NATIVE_IMAGE";

/// Deprecated alias of [`NATIVE_IMAGE`]; only its presence is checked.
pub const DEPRECATED_NATIVE_IMAGE: &str = "BP_BOOT_NATIVE_IMAGE";

/// Inline arguments passed to the compiler.
pub const BUILD_ARGUMENTS: &str = "BP_NATIVE_IMAGE_BUILD_ARGUMENTS";

/// Deprecated alias of [`BUILD_ARGUMENTS`].
pub const DEPRECATED_BUILD_ARGUMENTS: &str = "BP_BOOT_NATIVE_IMAGE_BUILD_ARGUMENTS";

/// Path to a file of compiler arguments.
pub const BUILD_ARGUMENTS_FILE: &str = "BP_NATIVE_IMAGE_BUILD_ARGUMENTS_FILE";

/// Glob, relative to the application root, locating the jar to compile.
pub const BUILT_ARTIFACT: &str = "BP_NATIVE_IMAGE_BUILT_ARTIFACT";

/// Post-compile compression method.
pub const COMPRESSION_METHOD: &str = "BP_BINARY_COMPRESSION_METHOD";

/// Classpath override set by upstream tooling.
pub const CLASSPATH: &str = "CLASSPATH";

/// Toggles the compiler's use of the Java platform module system.
pub const MODULE_SYSTEM: &str = "USE_NATIVE_IMAGE_JAVA_PLATFORM_MODULE_SYSTEM";

/// Stack identifier of the minimal base image that needs a static binary.
pub const TINY_STACK_ID: &str = "io.paketo.stacks.tiny";

/// Argument file some frameworks write into the application during packaging.
pub const EMBEDDED_ARGFILE: &str = "META-INF/native-image/argfile";
