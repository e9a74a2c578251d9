//! Filesystem abstraction for the environment provisioner
//!
//! Provides normalized path handling, atomic text I/O and format-agnostic
//! config loading for everything the provisioner reads or writes.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
