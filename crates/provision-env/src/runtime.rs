//! Python runtime detection

use crate::error::{Error, Result, Stage, classify};
use crate::runner::{CommandRunner, display_command};
use provision_fs::NormalizedPath;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").unwrap());

/// Supported major version of Python.
pub const MAJOR: u64 = 3;

/// Lowest supported minor version of [`MAJOR`].
pub const MIN_MINOR: u64 = 8;

/// A detected interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeDescriptor {
    pub version: Version,
    /// Where the interpreter was found on PATH, if it could be located.
    pub location: Option<NormalizedPath>,
}

impl RuntimeDescriptor {
    pub fn is_compatible(&self) -> bool {
        is_compatible(&self.version)
    }
}

/// Python 3.8 or any later 3.x release.
pub fn is_compatible(version: &Version) -> bool {
    version.major == MAJOR && version.minor >= MIN_MINOR
}

/// The lowest supported version as `MAJOR.MINOR`, for messages.
pub fn minimum_supported() -> String {
    format!("{}.{}", MAJOR, MIN_MINOR)
}

/// Extract the first `MAJOR.MINOR.PATCH` from interpreter output such as
/// `Python 3.11.4`.
pub fn parse_version(text: &str) -> Option<Version> {
    let caps = VERSION_PATTERN.captures(text)?;
    let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Parse a requested minimum such as `3.8` or `3.10.2`.
///
/// Missing components default to zero.
pub fn parse_requested(input: &str) -> Result<Version> {
    let invalid = || Error::InvalidVersion {
        input: input.to_string(),
    };
    let mut parts = input.trim().split('.');
    let mut next = |required: bool| -> Result<u64> {
        match parts.next() {
            Some(p) => p.parse().map_err(|_| invalid()),
            None if required => Err(invalid()),
            None => Ok(0),
        }
    };
    let version = Version::new(next(true)?, next(false)?, next(false)?);
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(version)
}

/// Query `<python> --version` and return the parsed version.
///
/// Python 2 prints its version on stderr, so both streams are searched.
pub fn query_version(
    runner: &dyn CommandRunner,
    python: &str,
    cwd: &NormalizedPath,
) -> Result<Version> {
    let args = vec!["--version".to_string()];
    let command = display_command(python, &args);
    let output = runner.run(python, &args, cwd)?;
    classify(Stage::DetectRuntime, &command, &output)?;

    parse_version(&output.combined()).ok_or_else(|| Error::EnvironmentUnavailable {
        message: format!(
            "could not read a version from `{}` output: {}",
            command,
            output.combined().trim()
        ),
    })
}

/// Detect the system interpreter named `python`.
pub fn detect(
    runner: &dyn CommandRunner,
    python: &str,
    cwd: &NormalizedPath,
) -> Result<RuntimeDescriptor> {
    let location = runner.locate(python);
    if location.is_none() {
        return Err(Error::EnvironmentUnavailable {
            message: format!("`{}` was not found on PATH", python),
        });
    }

    let version = query_version(runner, python, cwd)?;
    tracing::info!(%version, location = ?location.as_ref().map(|l| l.as_str()), "detected runtime");
    Ok(RuntimeDescriptor { version, location })
}
