//! Shared test utilities for the provision workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder for a temporary project directory
//! - [`runner`]: [`ScriptedRunner`], a fake Python toolchain

pub mod project;
pub mod runner;

pub use project::TestProject;
pub use runner::ScriptedRunner;
