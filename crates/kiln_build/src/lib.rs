//! Native-image build and detection.
//!
//! [`build`] resolves configuration for an application, compiles it into a
//! cached `native-image` layer and moves the result into the application
//! directory. [`detect`] reports the build plans the application can take
//! part in. External tools are run through an [`Executor`] so that tests can
//! replace them.

#![warn(missing_docs)]

pub mod build;
pub mod compress;
pub mod detect;
pub mod error;
pub mod exec;
pub mod native;
pub mod relocate;

pub use build::{build, BuildContext, BuildResult, Process};
pub use compress::compress;
pub use detect::{detect, BuildPlan, DetectResult, PlanProvide, PlanRequire};
pub use error::BuildError;
pub use exec::{CommandExecutor, ExecError, Execution, Executor};
pub use native::{NativeImage, NativeImageOutcome, COMPILER, LAYER_NAME};
pub use relocate::relocate;
