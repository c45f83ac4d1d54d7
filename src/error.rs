//! Error types for aicommit modules using thiserror.

use thiserror::Error;

/// Errors from running a shell command.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Failed to spawn shell command: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Shell command exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Shell command was terminated by a signal: {stderr}")]
    Interrupted { stderr: String },
}

/// Errors from the inference backend or its response stream.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Ollama HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Ollama API error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Ollama stream reported an error: {0}")]
    Stream(String),

    #[error("Ollama returned an unreadable stream chunk: {0}")]
    InvalidChunk(String),
}

/// Errors from reading the user's answer at the approval prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt was interrupted")]
    Interrupted,

    #[error("Failed to read from terminal: {0}")]
    Io(#[source] std::io::Error),
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                PromptError::Interrupted
            }
            dialoguer::Error::IO(e) => PromptError::Io(e),
        }
    }
}

/// Top-level error for a single run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Shell(ShellError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Prompt(PromptError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Interrupted by user")]
    Interrupted,
}

impl From<ShellError> for AppError {
    fn from(err: ShellError) -> Self {
        match err {
            // Ctrl-C reaches the child too, so a signalled child is the user cancelling.
            ShellError::Interrupted { .. } => AppError::Interrupted,
            other => AppError::Shell(other),
        }
    }
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => AppError::Interrupted,
            other => AppError::Prompt(other),
        }
    }
}

impl AppError {
    /// Whether this error is the user cancelling the run.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, AppError::Interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_error_non_zero_exit_message() {
        let err = ShellError::NonZeroExit {
            code: 128,
            stderr: "fatal: not a git repository".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Shell command exited with code 128: fatal: not a git repository"
        );
    }

    #[test]
    fn test_signalled_child_becomes_app_interrupt() {
        let err: AppError = ShellError::Interrupted {
            stderr: String::new(),
        }
        .into();
        assert!(err.is_interrupt());
    }

    #[test]
    fn test_spawn_failure_stays_shell_error() {
        let err: AppError = ShellError::SpawnFailed(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "sh not found",
        ))
        .into();
        assert!(matches!(err, AppError::Shell(ShellError::SpawnFailed(_))));
        assert!(!err.is_interrupt());
    }

    #[test]
    fn test_output_error_message() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: AppError = io.into();
        assert_eq!(err.to_string(), "Failed to write output: stdout closed");
        assert!(!err.is_interrupt());
    }

    #[test]
    fn test_backend_status_message() {
        let err = BackendError::Status {
            status: 404,
            body: "model 'llama3.2:3b' not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Ollama API error (HTTP 404): model 'llama3.2:3b' not found"
        );
    }

    #[test]
    fn test_prompt_interrupt_becomes_app_interrupt() {
        let err: AppError = PromptError::Interrupted.into();
        assert!(err.is_interrupt());
    }

    #[test]
    fn test_prompt_io_error_is_not_interrupt() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: AppError = PromptError::Io(io).into();
        assert!(!err.is_interrupt());
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn test_dialoguer_interrupted_maps_to_prompt_interrupted() {
        let io = std::io::Error::new(std::io::ErrorKind::Interrupted, "read interrupted");
        let err = PromptError::from(dialoguer::Error::IO(io));
        assert!(matches!(err, PromptError::Interrupted));
    }

    #[test]
    fn test_shell_and_backend_errors_are_not_interrupts() {
        let shell: AppError = ShellError::NonZeroExit {
            code: 1,
            stderr: "SIGINT".to_string(),
        }
        .into();
        assert!(!shell.is_interrupt());

        let backend: AppError = BackendError::Stream("boom".to_string()).into();
        assert!(!backend.is_interrupt());
    }
}
