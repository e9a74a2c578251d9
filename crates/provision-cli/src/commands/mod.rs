//! Command implementations for the provision CLI

pub mod check;
pub mod setup;

pub use check::{CheckReport, run_check};
pub use setup::{SetupOptions, SetupReport, run_setup};
