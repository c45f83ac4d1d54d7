//! AI-generated commit messages and the interactive approval loop.

pub mod approval;
pub mod generator;

pub use approval::{
    Action, ActionPrompter, ApprovalLoop, ApprovalOutcome, ApprovalState, PROCEED_PROMPT,
    TerminalPrompter,
};
pub use generator::MessageGenerator;
