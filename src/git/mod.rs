//! Git repository checks over the shell runner.

pub mod commands;
pub mod inspector;

pub use inspector::RepositoryInspector;
