//! Commit message generation from a streamed chat response.

use std::io::Write;

use tracing::debug;

use crate::config::Config;
use crate::error::AppError;
use crate::llm::{ChatBackend, ChatRequest, Instructions, build_messages};

/// Width of the rule printed above the streamed message.
const RULE_WIDTH: usize = 50;

/// Sends a diff to the chat backend and echoes the answer as it arrives.
pub struct MessageGenerator<'a, B: ChatBackend> {
    backend: &'a B,
    instructions: Instructions,
    model: String,
    debug: bool,
}

impl<'a, B: ChatBackend> MessageGenerator<'a, B> {
    pub fn new(backend: &'a B, instructions: Instructions, config: &Config) -> Self {
        Self {
            backend,
            instructions,
            model: config.model.clone(),
            debug: config.debug,
        }
    }

    /// Generate a commit message for `diff`.
    ///
    /// Every fragment is written to `out` as soon as it arrives and appended
    /// to the returned message in arrival order. A backend failure or a failed
    /// write ends generation.
    pub async fn generate<W: Write>(&self, diff: &str, out: &mut W) -> Result<String, AppError> {
        if self.debug {
            debug!("Using Ollama with {}", self.model);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: build_messages(self.instructions, diff),
        };

        let mut stream = self.backend.chat_stream(request).await?;

        writeln!(out, "✨ Generating commit message...")?;
        writeln!(out, "{}\n", "-".repeat(RULE_WIDTH))?;

        let mut message = String::new();
        while let Some(fragment) = stream.next_fragment().await? {
            write!(out, "{fragment}")?;
            out.flush()?;
            message.push_str(&fragment);
        }
        writeln!(out)?;

        if self.debug {
            debug!("Generated message: {} chars", message.len());
        }

        Ok(message)
    }
}
