//! Python virtual environments

mod venv;

pub use venv::{ACTIVATION_SCRIPT, BIN_DIR, Environment, INTERPRETER};
