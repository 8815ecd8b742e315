// Errors for a single question round trip. None of these are fatal: the REPL
// prints them and prompts again.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AskError {
    /// Connection refused, DNS failure, malformed URL, broken body stream.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The server answered with a non-success status. `body` is already
    /// flattened to one line and may be empty.
    #[error("server returned {status}{}", body_suffix(.body))]
    Status { status: StatusCode, body: String },

    /// The body was not JSON, or not a JSON object of the expected shape.
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AskError::Timeout(err)
        } else {
            AskError::Network(err)
        }
    }
}

pub type AskResult<T> = Result<T, AskError>;

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}
