//! aicommit - generate git commit messages from staged changes with a local LLM.
//!
//! # Overview
//!
//! aicommit reads the staged diff, streams a conventional commit message from
//! an Ollama model, and asks whether to commit it, discard it or generate a
//! new one.

pub mod app;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod shell;

// Re-export commonly used types
pub use app::{App, RunOutcome};
pub use commit::{Action, ActionPrompter, ApprovalOutcome, TerminalPrompter};
pub use config::Config;
pub use error::{AppError, BackendError, PromptError, ShellError};
pub use llm::{ChatBackend, OllamaBackend};
pub use shell::{ShellExecutor, ShellRunner};
