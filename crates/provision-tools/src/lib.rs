//! Editor integrations for the environment provisioner.
//!
//! Generates the editor documents that point a project at its virtual
//! environment. Documents are regenerated from scratch on every run; nothing
//! already on disk is merged or preserved.

pub mod error;
pub mod integration;
pub mod vscode;
pub mod writer;

pub use error::{Error, Result};
pub use integration::{EditorContext, EditorIntegration};
pub use vscode::VSCodeIntegration;
pub use writer::{WriteReport, WrittenFile};
