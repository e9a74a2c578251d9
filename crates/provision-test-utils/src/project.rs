//! [`TestProject`] builder for provisioning scenarios.

use provision_env::python::{ACTIVATION_SCRIPT, BIN_DIR, INTERPRETER};
use provision_env::{SetupConfig, SetupContext};
use provision_fs::NormalizedPath;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary project directory with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use provision_test_utils::TestProject;
///
/// let project = TestProject::new().with_requirements("requests\n");
/// project.assert_file_exists("requirements.txt");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn normalized_root(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Context with the default configuration.
    pub fn context(&self) -> SetupContext {
        SetupContext::new(self.normalized_root(), SetupConfig::default())
    }

    /// Write `content` to `path` (relative to the root), creating parents.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    pub fn with_requirements(self, content: &str) -> Self {
        self.write("requirements.txt", content);
        self
    }

    pub fn with_entry_script(self) -> Self {
        self.write("main.py", "print('hello')\n");
        self
    }

    /// Lay out an already-populated `venv/` with a marker file.
    pub fn with_environment(self, with_activation: bool) -> Self {
        let bin = format!("venv/{}", BIN_DIR);
        self.write(&format!("{}/{}", bin, INTERPRETER), "fake interpreter");
        if with_activation {
            self.write(&format!("{}/{}", bin, ACTIVATION_SCRIPT), "fake activation");
        }
        self.write("venv/marker.txt", "original environment");
        self
    }

    /// Read a file relative to the root.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Read a file relative to the root as raw bytes.
    pub fn read_bytes(&self, path: &str) -> Vec<u8> {
        let full_path = self.root().join(path);
        fs::read(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
