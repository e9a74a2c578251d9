//! Execution context threaded through every provisioning step

use crate::config::SetupConfig;
use crate::python::Environment;
use provision_fs::NormalizedPath;

/// Project root plus its configuration.
///
/// Every path the provisioner touches is derived from `root`; the process
/// working directory is never consulted or changed.
#[derive(Debug, Clone)]
pub struct SetupContext {
    pub root: NormalizedPath,
    pub config: SetupConfig,
}

impl SetupContext {
    pub fn new(root: NormalizedPath, config: SetupConfig) -> Self {
        Self { root, config }
    }

    pub fn environment(&self) -> Environment {
        Environment::new(&self.root, &self.config.venv_dir)
    }

    pub fn requirements_path(&self) -> NormalizedPath {
        self.root.join(&self.config.requirements)
    }

    pub fn python(&self) -> &str {
        &self.config.python
    }
}
