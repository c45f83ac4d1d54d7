//! Approval loop: generate, ask, then commit, discard or regenerate.
//!
//! The loop is a small state machine. `Regenerating` is the only transition
//! that leads back to `Generating`; every other answer ends in `Done`.

use std::io::Write;

use tracing::error;

use crate::commit::generator::MessageGenerator;
use crate::error::{AppError, PromptError};
use crate::git::commands;
use crate::llm::ChatBackend;
use crate::shell::ShellExecutor;

/// Question shown after each generated message.
pub const PROCEED_PROMPT: &str = "Proceed to commit? [y(yes) | n(no) | r(regenerate)]";

/// What the user asked for at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Accept,
    Reject,
    Regenerate,
    Invalid(String),
}

impl Action {
    /// Classify one line of input.
    ///
    /// Matching is case-sensitive; only surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "y" | "yes" => Action::Accept,
            "n" | "no" => Action::Reject,
            "r" | "regenerate" => Action::Regenerate,
            _ => Action::Invalid(input.to_string()),
        }
    }
}

/// How the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// The commit command ran; holds its stdout.
    Committed { output: String },
    Discarded,
    Invalid(String),
    /// The user accepted but the generated message was blank.
    EmptyMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalState {
    Generating,
    AwaitingInput(String),
    Committing(String),
    Regenerating,
    Done(ApprovalOutcome),
}

impl ApprovalState {
    /// State reached from `AwaitingInput(message)` after `action`.
    pub fn after_input(message: String, action: Action) -> Self {
        match action {
            Action::Accept if message.trim().is_empty() => {
                ApprovalState::Done(ApprovalOutcome::EmptyMessage)
            }
            Action::Accept => ApprovalState::Committing(message),
            Action::Reject => ApprovalState::Done(ApprovalOutcome::Discarded),
            Action::Regenerate => ApprovalState::Regenerating,
            Action::Invalid(input) => ApprovalState::Done(ApprovalOutcome::Invalid(input)),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApprovalState::Done(_))
    }
}

/// Reads the user's answer to the proceed prompt.
#[cfg_attr(test, mockall::automock)]
pub trait ActionPrompter: Send + Sync {
    fn ask(&self, question: &str) -> Result<String, PromptError>;
}

/// Prompter that reads one line from the terminal.
pub struct TerminalPrompter;

impl ActionPrompter for TerminalPrompter {
    fn ask(&self, question: &str) -> Result<String, PromptError> {
        let answer = dialoguer::Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}

/// Drives generation and approval for one staged diff.
pub struct ApprovalLoop<'a, E: ShellExecutor, B: ChatBackend, P: ActionPrompter> {
    shell: &'a E,
    generator: MessageGenerator<'a, B>,
    prompter: &'a P,
}

impl<'a, E: ShellExecutor, B: ChatBackend, P: ActionPrompter> ApprovalLoop<'a, E, B, P> {
    pub fn new(shell: &'a E, generator: MessageGenerator<'a, B>, prompter: &'a P) -> Self {
        Self {
            shell,
            generator,
            prompter,
        }
    }

    /// Run the loop until a terminal state is reached.
    ///
    /// Any error aborts the loop at once; nothing is committed after a failure.
    pub async fn run<W: Write>(&self, diff: &str, out: &mut W) -> Result<ApprovalOutcome, AppError> {
        let mut state = ApprovalState::Generating;

        loop {
            state = match self.step(state, diff, out).await {
                Ok(ApprovalState::Done(outcome)) => return Ok(outcome),
                Ok(next) => next,
                Err(e) => {
                    if !e.is_interrupt() {
                        error!("Error during interaction loop: {}", e);
                    }
                    return Err(e);
                }
            };
        }
    }

    /// Perform the work of `state` and return the next state.
    pub async fn step<W: Write>(
        &self,
        state: ApprovalState,
        diff: &str,
        out: &mut W,
    ) -> Result<ApprovalState, AppError> {
        match state {
            ApprovalState::Generating => {
                let message = self.generator.generate(diff, out).await?;
                Ok(ApprovalState::AwaitingInput(message))
            }
            ApprovalState::AwaitingInput(message) => {
                writeln!(out, "\n")?;
                let answer = self.prompter.ask(PROCEED_PROMPT)?;
                let next = ApprovalState::after_input(message, Action::parse(&answer));
                self.report(&next, out)?;
                Ok(next)
            }
            ApprovalState::Committing(message) => {
                writeln!(out, "committing...")?;
                let output = self
                    .shell
                    .run(commands::COMMIT, &[commands::quote_message(&message)])
                    .await?;
                writeln!(out, "\n{output}\n✨ Committed!")?;
                Ok(ApprovalState::Done(ApprovalOutcome::Committed { output }))
            }
            ApprovalState::Regenerating => {
                let cleared = self.shell.run(commands::clear_screen(), &[]).await?;
                writeln!(out, "{cleared}")?;
                Ok(ApprovalState::Generating)
            }
            ApprovalState::Done(outcome) => Ok(ApprovalState::Done(outcome)),
        }
    }

    fn report<W: Write>(&self, state: &ApprovalState, out: &mut W) -> std::io::Result<()> {
        match state {
            ApprovalState::Done(ApprovalOutcome::Discarded) => {
                writeln!(out, "\n❌ Discarding AI commit message.")?;
            }
            ApprovalState::Done(ApprovalOutcome::Invalid(_)) => {
                writeln!(out, "\n🤖 Invalid action")?;
            }
            ApprovalState::Done(ApprovalOutcome::EmptyMessage) => {
                writeln!(out, "\n🫙 Generated commit message is empty, nothing to commit.")?;
            }
            _ => {}
        }
        Ok(())
    }
}
