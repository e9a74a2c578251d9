//! Python environment provisioning.
//!
//! This crate detects the system Python runtime, creates and recreates the
//! project's virtual environment, installs its declared dependencies and
//! verifies that the required modules import inside it. External tools are
//! invoked through [`CommandRunner`] so every step can be exercised without a
//! real interpreter.

pub mod config;
pub mod context;
pub mod decision;
pub mod error;
pub mod install;
pub mod manifest;
pub mod python;
pub mod runner;
pub mod runtime;
pub mod verify;

pub use config::{SetupConfig, VerifyConfig};
pub use context::SetupContext;
pub use decision::{
    EnvPlan, needs_confirmation, plan_environment, should_continue, should_recreate,
};
pub use error::{Error, ErrorKind, Result, Stage, classify};
pub use install::InstallOutcome;
pub use manifest::DependencyManifest;
pub use python::Environment;
pub use runner::{CommandOutput, CommandRunner, SystemRunner, which};
pub use runtime::{RuntimeDescriptor, is_compatible};
pub use verify::{FileCheck, VerificationResult};
