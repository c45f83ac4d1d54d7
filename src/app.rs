//! Top-level run sequence: repository check, staged diff, approval loop.

use std::io::Write;

use tracing::debug;

use crate::commit::{ActionPrompter, ApprovalLoop, ApprovalOutcome, MessageGenerator};
use crate::config::Config;
use crate::error::AppError;
use crate::git::RepositoryInspector;
use crate::llm::{ChatBackend, Instructions};
use crate::shell::ShellExecutor;

/// How a run ended when no error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NotARepository,
    NoStagedChanges,
    Finished(ApprovalOutcome),
}

/// One invocation of the tool, wired to its collaborators.
pub struct App<'a, E: ShellExecutor, B: ChatBackend, P: ActionPrompter> {
    config: &'a Config,
    shell: &'a E,
    backend: &'a B,
    prompter: &'a P,
    instructions: Instructions,
}

impl<'a, E: ShellExecutor, B: ChatBackend, P: ActionPrompter> App<'a, E, B, P> {
    pub fn new(config: &'a Config, shell: &'a E, backend: &'a B, prompter: &'a P) -> Self {
        Self {
            config,
            shell,
            backend,
            prompter,
            instructions: Instructions::default(),
        }
    }

    pub fn with_instructions(mut self, instructions: Instructions) -> Self {
        self.instructions = instructions;
        self
    }

    /// Run once, writing user-facing notices to `out`.
    ///
    /// Generation is never started outside a repository or without staged
    /// changes.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunOutcome, AppError> {
        let inspector = RepositoryInspector::new(self.shell, self.config.debug);

        if !inspector.is_repository().await {
            writeln!(out, "🐙 Not a git repo.")?;
            return Ok(RunOutcome::NotARepository);
        }

        let diff = inspector.staged_diff().await?;
        if diff.trim().is_empty() {
            writeln!(out, "🗂️ No staged changes")?;
            return Ok(RunOutcome::NoStagedChanges);
        }

        if self.config.debug {
            debug!("Starting approval loop with model {}", self.config.model);
        }

        let generator = MessageGenerator::new(self.backend, self.instructions, self.config);
        let approval = ApprovalLoop::new(self.shell, generator, self.prompter);
        let outcome = approval.run(&diff, out).await?;

        Ok(RunOutcome::Finished(outcome))
    }
}
