// Session and client configuration.
// The base URL is captured once at startup and handed to the API client and
// the REPL as a plain value; nothing here is global.

use std::fmt;
use std::time::Duration;

/// Default request timeout for `POST /chat`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between one answer and the next prompt.
pub const DEFAULT_TURN_DELAY: Duration = Duration::from_millis(100);

/// The normalized base URL of the remote RAG endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    base_url: String,
}

impl Session {
    /// Build a session from raw user input: surrounding whitespace is trimmed
    /// and a single trailing `/` is removed. Returns `None` when nothing is
    /// left after normalization.
    pub fn from_input(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let base = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if base.is_empty() {
            return None;
        }
        Some(Session {
            base_url: base.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint below the base, e.g. `endpoint("chat")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}

/// Tunables for the HTTP client and the REPL loop.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub turn_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: DEFAULT_TIMEOUT,
            turn_delay: DEFAULT_TURN_DELAY,
        }
    }
}
