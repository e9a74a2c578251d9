//! Interactive prompts
//!
//! Uses dialoguer for terminal-based confirmation. Commands only see the
//! [`Prompter`] trait so the decisions behind each question stay testable.

use dialoguer::Confirm;
use std::io::IsTerminal;

use crate::error::Result;

/// Asks the user yes/no questions.
pub trait Prompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Prompts on the controlling terminal.
///
/// Without a terminal on stdin the default answer is returned.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        if !std::io::stdin().is_terminal() {
            tracing::debug!(message, default, "no terminal, using default answer");
            return Ok(default);
        }
        let answer = Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()?;
        Ok(answer)
    }
}
