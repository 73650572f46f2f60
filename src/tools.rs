//! External tool invocation
//!
//! Every subprocess the updater starts (cargo llvm-cov, cargo doc, git) goes
//! through the [`CommandRunner`] seam:
//! 1. Describe the invocation as a [`ToolCommand`]
//! 2. Run it synchronously, capturing stdout and stderr
//! 3. Hand back a [`ToolOutput`]; the caller decides whether non-zero is fatal

use crate::error::{BadgeError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// A fully described subprocess invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Human-readable name used in diagnostics
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    /// Working directory (inherited when `None`)
    pub cwd: Option<PathBuf>,
    /// Extra environment variables layered on top of the inherited environment
    pub env: Vec<(String, String)>,
}

impl ToolCommand {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Value following `flag` in the argument list, if any
    pub fn arg_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

/// Captured result of a completed subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Process exit code (`None` when terminated by a signal)
    pub return_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            return_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(return_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            return_code: Some(return_code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.return_code == Some(0)
    }

    /// Turn a non-zero exit into a fatal [`BadgeError::ToolFailed`]
    pub fn require_success(self, tool: &str) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(BadgeError::ToolFailed {
            tool: tool.to_string(),
            code: self.return_code,
            stdout: self.stdout,
            stderr: self.stderr,
        })
    }
}

/// Capability to run an external command to completion
pub trait CommandRunner {
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput>;
}

/// Runs commands as real subprocesses with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, tool: &ToolCommand) -> Result<ToolOutput> {
        debug!("Running {}: {} {:?}", tool.name, tool.program, tool.args);

        let mut command = Command::new(&tool.program);
        command.args(&tool.args);

        if let Some(dir) = &tool.cwd {
            command.current_dir(dir);
        }

        // Merge custom env with current environment
        for (key, value) in &tool.env {
            command.env(key, value);
        }

        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        let output = command.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BadgeError::ToolUnavailable(tool.program.clone())
            } else {
                BadgeError::ToolSpawn {
                    tool: tool.name.clone(),
                    source: e,
                }
            }
        })?;

        let result = ToolOutput {
            return_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        debug!("{} exited with {:?}", tool.name, result.return_code);
        Ok(result)
    }
}

/// Run `command` and fail unless it exits zero
pub fn run_checked(runner: &dyn CommandRunner, command: &ToolCommand) -> Result<ToolOutput> {
    runner.run(command)?.require_success(&command.name)
}
