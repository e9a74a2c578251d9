//! Pure decisions behind the interactive prompts.
//!
//! The CLI asks the questions; these functions decide what the answers mean.
//! `user_response` is `None` when no question was asked.

/// What to do with the environment directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvPlan {
    /// Nothing there yet: build it.
    Create,
    /// Delete the existing directory, then build it.
    Recreate,
    /// Keep the existing directory untouched.
    Reuse,
}

/// Whether an existing environment should be deleted and rebuilt.
pub fn should_recreate(exists: bool, force: bool, user_response: Option<bool>) -> bool {
    exists && (force || user_response == Some(true))
}

/// Whether the user has to be asked about recreating.
pub fn needs_confirmation(exists: bool, force: bool) -> bool {
    exists && !force
}

pub fn plan_environment(exists: bool, force: bool, user_response: Option<bool>) -> EnvPlan {
    if !exists {
        EnvPlan::Create
    } else if should_recreate(exists, force, user_response) {
        EnvPlan::Recreate
    } else {
        EnvPlan::Reuse
    }
}

/// Whether to carry on after the runtime check.
///
/// A compatible runtime always continues; otherwise `force` or an explicit
/// yes is required.
pub fn should_continue(compatible: bool, force: bool, user_response: Option<bool>) -> bool {
    compatible || force || user_response == Some(true)
}
