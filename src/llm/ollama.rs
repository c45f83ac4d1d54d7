//! Ollama local LLM backend.
//!
//! Talks to `/api/chat` with streaming enabled. Ollama answers with
//! newline-delimited JSON objects, one per generated fragment, ending with an
//! object whose `done` flag is set.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::BackendError;
use crate::llm::backend::{ChatBackend, ChatMessage, ChatRequest, ChatStream};

/// Ollama backend for a local or remote instance.
pub struct OllamaBackend {
    client: Client,
    /// Base URL for the Ollama API (default: `http://localhost:11434`).
    api_base: String,
    debug: bool,
}

/// Request body for Ollama's `/api/chat` endpoint.
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

/// One line of a streamed `/api/chat` response.
#[derive(Debug, Deserialize)]
struct OllamaChatChunk {
    #[serde(default)]
    message: Option<OllamaChunkMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaChunkMessage {
    #[serde(default)]
    content: String,
}

impl OllamaBackend {
    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(config.ollama_host.clone(), config.debug)
    }

    pub fn with_base_url(api_base: String, debug: bool) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            debug,
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.api_base)
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    async fn chat_stream(&self, request: ChatRequest) -> Result<Box<dyn ChatStream>, BackendError> {
        let url = self.chat_url();

        if self.debug {
            debug!(
                "Using Ollama at {} with {} ({} messages, {} chars)",
                url,
                request.model,
                request.messages.len(),
                request.messages.iter().map(|m| m.content.len()).sum::<usize>()
            );
        }

        let body = OllamaChatRequest {
            model: &request.model,
            messages: &request.messages,
            stream: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(BackendError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: extract_error_message(&body),
            });
        }

        Ok(Box::new(OllamaStream::new(response)))
    }
}

/// Pull the `error` field out of an Ollama error body, or return the body as is.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<OllamaChatChunk>(body)
        .ok()
        .and_then(|chunk| chunk.error)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Fragment stream over a streaming `/api/chat` response body.
pub struct OllamaStream {
    response: Response,
    buffer: Vec<u8>,
    finished: bool,
}

impl OllamaStream {
    fn new(response: Response) -> Self {
        Self {
            response,
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// Take the next complete line out of the buffer.
    fn take_line(&mut self) -> Option<Vec<u8>> {
        let pos = self.buffer.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
        line.pop();
        Some(line)
    }

    /// Decode one NDJSON line.
    ///
    /// Returns `Ok(None)` for lines that carry no text.
    fn decode_line(&mut self, line: &[u8]) -> Result<Option<String>, BackendError> {
        let text = String::from_utf8_lossy(line);
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let chunk: OllamaChatChunk = serde_json::from_str(text)
            .map_err(|e| BackendError::InvalidChunk(format!("{e}: {text}")))?;

        if let Some(error) = chunk.error {
            self.finished = true;
            return Err(BackendError::Stream(error));
        }

        if chunk.done {
            self.finished = true;
        }

        Ok(chunk
            .message
            .map(|m| m.content)
            .filter(|content| !content.is_empty()))
    }
}

#[async_trait]
impl ChatStream for OllamaStream {
    async fn next_fragment(&mut self) -> Result<Option<String>, BackendError> {
        loop {
            if self.finished {
                return Ok(None);
            }

            if let Some(line) = self.take_line() {
                if let Some(fragment) = self.decode_line(&line)? {
                    return Ok(Some(fragment));
                }
                continue;
            }

            match self.response.chunk().await.map_err(BackendError::Request)? {
                Some(bytes) => self.buffer.extend_from_slice(&bytes),
                None => {
                    // Body ended; a final line may lack its newline.
                    let rest = std::mem::take(&mut self.buffer);
                    self.finished = true;
                    return self.decode_line(&rest);
                }
            }
        }
    }
}
