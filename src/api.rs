// API client module: a small blocking HTTP client that relays questions to
// the remote RAG endpoint. Retrieval and generation happen on the server; this
// side only sends the question and decodes the answer.

use crate::config::{ClientConfig, Session};
use crate::error::{AskError, AskResult};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Text shown when the server does not return an `answer` field.
pub const NO_ANSWER: &str = "(no answer)";

/// Longest error body kept for the `Request error:` line, in characters.
pub const MAX_ERROR_BODY: usize = 200;

/// Holds a reqwest blocking client and the session it talks to. The client is
/// built once and reused for every question.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    session: Session,
}

/// Payload for `POST /chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub question: &'a str,
}

/// Response from `POST /chat`. Both fields are optional on the wire; a
/// missing or `null` value is not an error.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

impl ChatResponse {
    pub fn answer_text(&self) -> &str {
        self.answer.as_deref().unwrap_or(NO_ANSWER)
    }

    /// Sources joined with `", "`; empty when there are none.
    pub fn sources_text(&self) -> String {
        self.sources.as_deref().unwrap_or_default().join(", ")
    }
}

impl ApiClient {
    /// Create a client for `session` with the timeout from `config`.
    pub fn new(session: Session, config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// POST the question to `{base}/chat` and decode the JSON answer.
    pub fn ask(&self, question: &str) -> AskResult<ChatResponse> {
        let url = self.session.endpoint("chat");
        tracing::debug!(%url, "sending question");
        let started = Instant::now();

        let res = self
            .client
            .post(&url)
            .json(&ChatRequest { question })
            .send()?;

        let status = res.status();
        // A failed body read still leaves the status worth reporting.
        let body = res.text();
        tracing::debug!(%status, elapsed_ms = started.elapsed().as_millis() as u64, "response received");

        if !status.is_success() {
            return Err(AskError::Status {
                status,
                body: one_line(&body.unwrap_or_default(), MAX_ERROR_BODY),
            });
        }
        let resp: ChatResponse = serde_json::from_str(&body?)?;
        Ok(resp)
    }
}

/// Collapse all whitespace runs (newlines included) to single spaces and cap
/// the result at `max` characters, marking a cut with `...`.
pub fn one_line(body: &str, max: usize) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max).collect();
    cut.push_str("...");
    cut
}
