//! EditorIntegration trait for writing editor configuration

use crate::error::Result;
use crate::writer::WriteReport;
use provision_fs::NormalizedPath;

/// Everything an editor integration needs to describe the project.
#[derive(Debug, Clone)]
pub struct EditorContext {
    pub root: NormalizedPath,
    /// Directory receiving the documents, relative to `root`
    pub config_dir: String,
    /// Interpreter inside the project's environment
    pub interpreter: NormalizedPath,
    /// Script run by the launch profile and build task, relative to `root`
    pub entry_script: String,
}

impl EditorContext {
    pub fn new(
        root: NormalizedPath,
        config_dir: impl Into<String>,
        interpreter: NormalizedPath,
        entry_script: impl Into<String>,
    ) -> Self {
        Self {
            root,
            config_dir: config_dir.into(),
            interpreter,
            entry_script: entry_script.into(),
        }
    }

    pub fn config_dir_path(&self) -> NormalizedPath {
        self.root.join(&self.config_dir)
    }
}

/// Trait for editor integrations
pub trait EditorIntegration {
    /// The editor's slug identifier (e.g., "vscode")
    fn name(&self) -> &str;

    /// Documents written by [`EditorIntegration::write`], relative to the
    /// config directory.
    fn documents(&self) -> Vec<&str>;

    /// Create the config directory if needed and overwrite every document.
    fn write(&self, context: &EditorContext) -> Result<WriteReport>;
}
