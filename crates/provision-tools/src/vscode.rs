//! VSCode integration for the environment provisioner.
//!
//! Writes `.vscode/settings.json`, `.vscode/launch.json` and
//! `.vscode/tasks.json` so the editor runs, debugs and builds the project
//! with the environment's interpreter.

use crate::error::Result;
use crate::integration::{EditorContext, EditorIntegration};
use crate::writer::{WriteReport, write_json};
use provision_fs::io;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

const SETTINGS: &str = "settings.json";
const LAUNCH: &str = "launch.json";
const TASKS: &str = "tasks.json";

const WORKSPACE_FOLDER: &str = "${workspaceFolder}";

/// VSCode integration.
#[derive(Debug, Default)]
pub struct VSCodeIntegration;

/// `launch.json`
#[derive(Debug, Serialize)]
pub struct LaunchDocument {
    pub version: &'static str,
    pub configurations: Vec<LaunchConfiguration>,
}

#[derive(Debug, Serialize)]
pub struct LaunchConfiguration {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub request: &'static str,
    pub program: String,
    pub console: &'static str,
    pub cwd: &'static str,
    pub env: BTreeMap<String, String>,
    pub args: Vec<String>,
}

/// `tasks.json`
#[derive(Debug, Serialize)]
pub struct TasksDocument {
    pub version: &'static str,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub command: String,
    pub args: Vec<String>,
    pub group: TaskGroup,
    pub presentation: TaskPresentation,
    pub problem_matcher: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub kind: &'static str,
    pub is_default: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskPresentation {
    pub echo: bool,
    pub reveal: &'static str,
    pub focus: bool,
    pub panel: &'static str,
}

impl VSCodeIntegration {
    pub fn new() -> Self {
        Self
    }

    /// Interpreter path plus linting, formatting and file-visibility toggles.
    pub fn settings(context: &EditorContext) -> Value {
        json!({
            "python.defaultInterpreterPath": context.interpreter.as_str(),
            "python.terminal.activateEnvironment": true,
            "python.linting.enabled": true,
            "python.linting.pylintEnabled": true,
            "python.formatting.provider": "black",
            "editor.formatOnSave": true,
            "files.exclude": {
                "**/__pycache__": true,
                "**/*.pyc": true
            }
        })
    }

    /// A single launch profile for the entry script.
    pub fn launch(context: &EditorContext) -> LaunchDocument {
        LaunchDocument {
            version: "0.2.0",
            configurations: vec![LaunchConfiguration {
                name: format!("Python: {}", context.entry_script),
                kind: "python",
                request: "launch",
                program: format!("{}/{}", WORKSPACE_FOLDER, context.entry_script),
                console: "integratedTerminal",
                cwd: WORKSPACE_FOLDER,
                env: BTreeMap::new(),
                args: Vec::new(),
            }],
        }
    }

    /// A default build task running the entry script with the interpreter.
    pub fn tasks(context: &EditorContext) -> TasksDocument {
        TasksDocument {
            version: "2.0.0",
            tasks: vec![Task {
                label: format!("Run {}", context.entry_script),
                kind: "shell",
                command: context.interpreter.as_str().to_string(),
                args: vec![context.entry_script.clone()],
                group: TaskGroup {
                    kind: "build",
                    is_default: true,
                },
                presentation: TaskPresentation {
                    echo: true,
                    reveal: "always",
                    focus: false,
                    panel: "shared",
                },
                problem_matcher: Vec::new(),
            }],
        }
    }
}

impl EditorIntegration for VSCodeIntegration {
    fn name(&self) -> &str {
        "vscode"
    }

    fn documents(&self) -> Vec<&str> {
        vec![SETTINGS, LAUNCH, TASKS]
    }

    fn write(&self, context: &EditorContext) -> Result<WriteReport> {
        let dir = context.config_dir_path();
        let created_dir = io::ensure_dir(&dir)?;

        let files = vec![
            write_json(&dir.join(SETTINGS), &Self::settings(context))?,
            write_json(&dir.join(LAUNCH), &Self::launch(context))?,
            write_json(&dir.join(TASKS), &Self::tasks(context))?,
        ];

        tracing::info!(dir = %dir, "wrote VSCode configuration");
        Ok(WriteReport { created_dir, files })
    }
}
