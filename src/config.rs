//! Run configuration, built once in `main` and passed into every component.

use std::env;

use tracing::warn;

/// Model used for every generation.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Address of a local Ollama instance.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Environment variable the Ollama client libraries read for the server address.
const OLLAMA_HOST_ENV_VAR: &str = "OLLAMA_HOST";

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log composed commands, the diff payload and backend details.
    pub debug: bool,
    pub model: String,
    /// Base URL of the Ollama API, without a trailing slash.
    pub ollama_host: String,
}

impl Config {
    /// Build the configuration for this process.
    ///
    /// Only `debug` comes from the command line. The backend address may be
    /// overridden with `OLLAMA_HOST`.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            model: DEFAULT_MODEL.to_string(),
            ollama_host: resolve_ollama_host(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            model: DEFAULT_MODEL.to_string(),
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
        }
    }
}

/// Read `OLLAMA_HOST`, falling back to the local default.
///
/// A bare `host:port` gets an `http://` scheme. Empty or whitespace values are
/// ignored with a warning.
fn resolve_ollama_host() -> String {
    match env::var(OLLAMA_HOST_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => normalize_host(v.trim()),
        Ok(v) => {
            warn!(
                "Invalid {} value '{}', using default {}",
                OLLAMA_HOST_ENV_VAR, v, DEFAULT_OLLAMA_HOST
            );
            DEFAULT_OLLAMA_HOST.to_string()
        }
        Err(_) => DEFAULT_OLLAMA_HOST.to_string(),
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}
