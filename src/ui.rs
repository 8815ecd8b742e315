// UI layer: the question/answer loop. Reads a line, relays it to the API
// client, prints the answer and its sources. Request failures are printed and
// the loop carries on; only exit/quit or the end of input stop it.

use crate::api::{ApiClient, ChatResponse};
use crate::config::{ClientConfig, Session};
use crate::error::AskError;
use crate::input::LineSource;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

pub const BASE_URL_PROMPT: &str = "Enter your RAG base URL (e.g. https://abcd.ngrok.io): ";
pub const QUESTION_PROMPT: &str = "\n> ";

/// Where the loop is. There is no way back from `Terminated`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplState {
    AwaitingInput,
    Terminated,
}

/// Prompt for the base URL and normalize it. `Ok(None)` when the input
/// ended before a URL was given.
pub fn initialize(input: &mut dyn LineSource) -> Result<Option<Session>> {
    let Some(raw) = input
        .read_line(BASE_URL_PROMPT)
        .context("Failed to read base URL")?
    else {
        return Ok(None);
    };
    match Session::from_input(&raw) {
        Some(session) => Ok(Some(session)),
        None => bail!("Base URL must not be empty"),
    }
}

/// `true` for `exit` / `quit` in any letter case.
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// The interactive loop. Owns the API client and writes the transcript to
/// `out` (stdout in the binary, a buffer in tests).
pub struct Repl<W: Write> {
    api: ApiClient,
    out: W,
    turn_delay: Duration,
    spinner: bool,
    state: ReplState,
}

impl<W: Write> Repl<W> {
    pub fn new(api: ApiClient, config: &ClientConfig, out: W) -> Self {
        Repl {
            api,
            out,
            turn_delay: config.turn_delay,
            spinner: false,
            state: ReplState::AwaitingInput,
        }
    }

    /// Show an indicatif spinner on stderr while a request is in flight.
    pub fn with_spinner(mut self, enabled: bool) -> Self {
        self.spinner = enabled;
        self
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Relay one question and print the outcome. Errors are printed, never
    /// returned; the only `Err` is a failure to write the transcript itself.
    pub fn ask(&mut self, question: &str) -> io::Result<()> {
        let spinner = self.start_spinner();
        let result = self.api.ask(question);
        spinner.finish_and_clear();

        match result {
            Ok(resp) => self.print_answer(&resp),
            Err(err) => self.print_error(&err),
        }
    }

    /// Run until exit/quit or end of input.
    pub fn run(&mut self, input: &mut dyn LineSource) -> io::Result<()> {
        writeln!(self.out, "Connected to {}", self.api.session())?;

        while self.state == ReplState::AwaitingInput {
            self.step(input)?;
        }
        Ok(())
    }

    /// One turn of the loop: read, then either stop or ask.
    pub fn step(&mut self, input: &mut dyn LineSource) -> io::Result<ReplState> {
        self.out.flush()?;
        let line = match input.read_line(QUESTION_PROMPT) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "input stream failed; ending session");
                None
            }
        };

        match line {
            Some(q) if !is_exit_command(&q) => {
                writeln!(self.out, "[Retrieving context...]")?;
                writeln!(self.out, "[Calling LLM...]")?;
                self.ask(&q)?;
                thread::sleep(self.turn_delay);
            }
            _ => {
                writeln!(self.out, "bye")?;
                self.out.flush()?;
                self.state = ReplState::Terminated;
            }
        }
        Ok(self.state)
    }

    fn print_answer(&mut self, resp: &ChatResponse) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Answer: {}", resp.answer_text())?;
        let sources = resp.sources_text();
        if sources.is_empty() {
            writeln!(self.out, "Sources:")
        } else {
            writeln!(self.out, "Sources: {}", sources)
        }
    }

    fn print_error(&mut self, err: &AskError) -> io::Result<()> {
        // The stdout line is the report; this is only for RUST_LOG=debug.
        tracing::debug!(error = ?err, "chat request failed");
        writeln!(self.out, "Request error: {}", err)
    }

    fn start_spinner(&self) -> ProgressBar {
        if !self.spinner {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Waiting for answer...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
