//! Chat backend abstraction, the Ollama client and the instruction template.

pub mod backend;
pub mod ollama;
pub mod prompt;

pub use backend::{ChatBackend, ChatMessage, ChatRequest, ChatRole, ChatStream};
pub use ollama::OllamaBackend;
pub use prompt::{Instructions, SYSTEM_PROMPT, build_messages};
