//! Build plans offered during detection.

use kiln_config::{CompressionMethod, ConfigResolver, DetectConfig};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::BuildError;

/// Plan entry for a natively compiled application.
pub const NATIVE_IMAGE_APPLICATION: &str = "native-image-application";
/// Plan entry for an application already processed for native compilation.
pub const NATIVE_PROCESSED: &str = "native-processed";
/// Plan entry for the compiler toolchain.
pub const NATIVE_IMAGE_BUILDER: &str = "native-image-builder";
/// Plan entry for a JVM application.
pub const JVM_APPLICATION: &str = "jvm-application";
/// Plan entry for a Spring Boot application.
pub const SPRING_BOOT: &str = "spring-boot";
/// Plan entry for the `upx` compressor.
pub const UPX: &str = "upx";

/// A dependency a plan provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanProvide {
    /// Entry name.
    pub name: String,
}

/// A dependency a plan requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRequire {
    /// Entry name.
    pub name: String,
    /// Extra requirement metadata.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl PlanRequire {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metadata: Map::new(),
        }
    }

    fn native(name: &str) -> Self {
        let mut metadata = Map::new();
        metadata.insert("native-image".to_string(), Value::Bool(true));
        Self {
            name: name.to_string(),
            metadata,
        }
    }
}

/// One alternative set of provides and requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    /// What the plan provides.
    pub provides: Vec<PlanProvide>,
    /// What the plan requires.
    pub requires: Vec<PlanRequire>,
}

impl BuildPlan {
    fn new(requires: Vec<PlanRequire>) -> Self {
        Self {
            provides: vec![PlanProvide {
                name: NATIVE_IMAGE_APPLICATION.to_string(),
            }],
            requires,
        }
    }

    /// Returns `true` if the plan requires `name`.
    pub fn requires(&self, name: &str) -> bool {
        self.requires.iter().any(|r| r.name == name)
    }
}

/// Outcome of detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectResult {
    /// Whether detection passed.
    pub pass: bool,
    /// Alternative build plans.
    pub plans: Vec<BuildPlan>,
}

/// Reports the plans this build can take part in.
///
/// Detection always passes so that a later step may still require a native
/// image. Explicitly enabling native compilation makes every plan require a
/// native application, and `upx` compression adds a requirement on `upx`.
pub fn detect(resolver: &ConfigResolver) -> Result<DetectResult, BuildError> {
    let config = DetectConfig::resolve(resolver).inspect_err(|_| {
        info!("SKIPPED: The BP_NATIVE_IMAGE environment variable was not set to true");
    })?;

    let mut plans = vec![
        BuildPlan::new(vec![
            PlanRequire::named(NATIVE_IMAGE_BUILDER),
            PlanRequire::native(JVM_APPLICATION),
            PlanRequire::native(SPRING_BOOT),
        ]),
        BuildPlan::new(vec![
            PlanRequire::named(NATIVE_IMAGE_BUILDER),
            PlanRequire::named(NATIVE_PROCESSED),
            PlanRequire::named(NATIVE_IMAGE_APPLICATION),
        ]),
        BuildPlan::new(vec![
            PlanRequire::named(NATIVE_IMAGE_BUILDER),
            PlanRequire::native(JVM_APPLICATION),
        ]),
    ];

    if config.native_image_enabled {
        for plan in &mut plans {
            if !plan.requires(NATIVE_IMAGE_APPLICATION) {
                plan.requires.push(PlanRequire::named(NATIVE_IMAGE_APPLICATION));
            }
        }
    }

    if config.compression == CompressionMethod::InPlace {
        for plan in &mut plans {
            plan.requires.push(PlanRequire::named(UPX));
        }
    }

    Ok(DetectResult { pass: true, plans })
}
