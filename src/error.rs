//! Error taxonomy for the badge updater
//!
//! Every variant is terminal for the invocation. [`BadgeError::exit_code`]
//! maps a variant to the process exit code: external tool failures mirror the
//! tool's own code, everything else is a generic failure.

use std::path::PathBuf;
use thiserror::Error;

/// Generic failure exit code for internal consistency errors
pub const FAILURE_EXIT_CODE: u8 = 1;

/// Errors that can occur while refreshing coverage badges
#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("{tool} failed with exit code {}", display_code(.code))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("{0} not found. Please install it first.")]
    ToolUnavailable(String),

    #[error("Failed to run {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Coverage(String),

    #[error("Failed to parse coverage report {}: {source}", .path.display())]
    ReportParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} not found.", .path.display())]
    ReadmeNotFound { path: PathBuf },

    #[error("{} is out of date; rerun without --check to refresh it.", .path.display())]
    ReadmeStale { path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

pub type Result<T> = std::result::Result<T, BadgeError>;

impl BadgeError {
    /// Shorthand for a fatal coverage-report problem
    pub fn coverage(message: impl Into<String>) -> Self {
        Self::Coverage(message.into())
    }

    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error.
    ///
    /// Tool codes outside `1..=255` collapse to the generic failure code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ToolFailed { code: Some(code), .. } => u8::try_from(*code)
                .ok()
                .filter(|c| *c != 0)
                .unwrap_or(FAILURE_EXIT_CODE),
            _ => FAILURE_EXIT_CODE,
        }
    }

    /// Captured (stdout, stderr) of a failed tool, to be surfaced verbatim
    pub fn captured_output(&self) -> Option<(&str, &str)> {
        match self {
            Self::ToolFailed { stdout, stderr, .. } => Some((stdout.as_str(), stderr.as_str())),
            _ => None,
        }
    }
}
