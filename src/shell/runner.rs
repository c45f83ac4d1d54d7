//! Runs command lines through the platform shell.
//!
//! Commands are joined into one command line and handed to `sh -c` (or
//! `cmd /C` on Windows), so the user's git config and PATH apply as usual.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::error::ShellError;

/// Trait for executing shell commands.
///
/// This abstraction allows mocking the shell in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShellExecutor: Send + Sync {
    /// Run `command` followed by `extra_args` and return captured stdout.
    async fn run(&self, command: &str, extra_args: &[String]) -> Result<String, ShellError>;
}

/// Join a command and its extra argument tokens into one command line.
///
/// The command is split on single spaces and rejoined, so the result is the
/// tokens separated by single spaces in their original order.
pub fn compose_command_line(command: &str, extra_args: &[String]) -> String {
    command
        .split(' ')
        .map(str::to_string)
        .chain(extra_args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Default executor backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    debug: bool,
    current_dir: Option<PathBuf>,
}

impl ShellRunner {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            current_dir: None,
        }
    }

    /// Run commands in `dir` instead of the process working directory.
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    fn shell_command(command_line: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command_line);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command_line);
            cmd
        }
    }
}

#[async_trait]
impl ShellExecutor for ShellRunner {
    async fn run(&self, command: &str, extra_args: &[String]) -> Result<String, ShellError> {
        let command_line = compose_command_line(command, extra_args);

        if self.debug {
            debug!("Running command: {}", command_line);
        }

        let mut cmd = Self::shell_command(&command_line);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(ShellError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            error!("Error running command: {}", stderr.trim_end());
            return Err(match output.status.code() {
                Some(code) => ShellError::NonZeroExit { code, stderr },
                None => ShellError::Interrupted { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
