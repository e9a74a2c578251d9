//! Constants for the files and directories the provisioner owns.

use std::path::Path;

/// Well-known paths relative to the project root.
///
/// These are defaults; the project config may relocate the environment,
/// the manifest and the editor directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `venv` directory (isolated environment root)
    Venv,
    /// The `requirements.txt` dependency manifest
    Requirements,
    /// The `.vscode` directory (editor configuration)
    EditorDir,
    /// The `main.py` entry script
    EntryScript,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Venv => "venv",
            Self::Requirements => "requirements.txt",
            Self::EditorDir => ".vscode",
            Self::EntryScript => "main.py",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
