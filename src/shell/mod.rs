//! Shell command execution.

pub mod runner;

pub use runner::{ShellExecutor, ShellRunner, compose_command_line};
