//! Project configuration
//!
//! Loaded from an optional `provision.{toml,json,yaml}` at the project root.
//! Every key has a default, so a project without a config file gets the
//! standard layout: `venv/`, `requirements.txt`, `main.py` and `.vscode/`.

use crate::error::{Error, Result};
use provision_fs::{ConfigStore, NormalizedPath, ProjectPath};
use serde::Deserialize;

/// File stem looked up at the project root.
pub const CONFIG_STEM: &str = "provision";

/// Modules the target project imports at startup.
const DEFAULT_MODULES: &[&str] = &[
    "tkinter",
    "requests",
    "PyPDF2",
    "docx",
    "pdfplumber",
    "PIL",
    "fpdf",
    "reportlab",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    /// Environment directory, relative to the project root
    pub venv_dir: String,
    /// Dependency manifest, relative to the project root
    pub requirements: String,
    /// Script launched by the run configuration and build task
    pub entry_script: String,
    /// Directory receiving the editor documents
    pub editor_dir: String,
    /// System interpreter used for detection and environment creation
    pub python: String,
    /// Editor binary offered at completion
    pub editor: String,
    /// Files the `check` command expects at the project root
    pub required_files: Vec<String>,
    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    /// Import names checked inside the environment
    pub modules: Vec<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            venv_dir: ProjectPath::Venv.as_str().to_string(),
            requirements: ProjectPath::Requirements.as_str().to_string(),
            entry_script: ProjectPath::EntryScript.as_str().to_string(),
            editor_dir: ProjectPath::EditorDir.as_str().to_string(),
            python: default_python().to_string(),
            editor: "code".to_string(),
            required_files: vec![
                ProjectPath::EntryScript.as_str().to_string(),
                ProjectPath::Requirements.as_str().to_string(),
            ],
            verify: VerifyConfig::default(),
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

fn default_python() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

impl SetupConfig {
    /// Load the project config from `root`, falling back to defaults when no
    /// config file exists. The result is validated.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let store = ConfigStore::new();
        let config = match store.discover(root, CONFIG_STEM) {
            Some(path) => {
                tracing::debug!(path = %path, "loading project config");
                store.load::<Self>(&path)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("venv_dir", &self.venv_dir),
            ("requirements", &self.requirements),
            ("entry_script", &self.entry_script),
            ("editor_dir", &self.editor_dir),
            ("python", &self.python),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig {
                    message: format!("`{}` must not be empty", key),
                });
            }
        }

        for (key, value) in [("venv_dir", &self.venv_dir), ("editor_dir", &self.editor_dir)] {
            if !is_project_subdir(value) {
                return Err(Error::InvalidConfig {
                    message: format!(
                        "`{}` must be a directory inside the project, got '{}'",
                        key, value
                    ),
                });
            }
        }

        if let Some(bad) = self.verify.modules.iter().find(|m| !is_module_name(m)) {
            return Err(Error::InvalidModuleName { name: bad.clone() });
        }
        Ok(())
    }
}

/// A relative path that names a directory strictly below the project root.
///
/// The environment directory is deleted on recreate, so `.`, anything with a
/// `..` component, and absolute or drive-qualified paths are refused.
pub fn is_project_subdir(value: &str) -> bool {
    let normalized = value.trim().replace('\\', "/");
    if normalized.starts_with('/') || has_drive_prefix(&normalized) {
        return false;
    }
    let mut segments = normalized
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .peekable();
    segments.peek().is_some() && segments.all(|segment| segment != "..")
}

fn has_drive_prefix(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}

/// A dotted Python import path such as `PIL` or `xml.etree.ElementTree`.
///
/// Names are interpolated into `python -c "import <name>"`, so anything else
/// is rejected.
pub fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        })
}
