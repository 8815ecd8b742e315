// Line input for the REPL. The loop only needs "give me the next line, or
// tell me the input is over", so that is the whole capability; dialoguer (base
// URL on a terminal), stdin lines and test scripts each provide it.

use dialoguer::Input;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

/// A source of user input lines.
pub trait LineSource {
    /// Show `prompt` and read one line without its line terminator.
    /// `Ok(None)` means the input has ended.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Interactive prompt via `dialoguer`, used for the base URL when stdin is a
/// terminal. dialoguer reads in raw mode and drops control keys, so Ctrl-D
/// does not end input here; question lines go through [`ReaderInput`].
pub struct TerminalInput;

impl LineSource for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let result = Input::<String>::new()
            .with_prompt(dialoguer_prompt(prompt))
            .allow_empty(true)
            .report(false)
            .interact_text();
        match result {
            Ok(line) => Ok(Some(line)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// dialoguer appends its own ": ", so drop a trailing colon and the
/// surrounding whitespace from ours.
fn dialoguer_prompt(prompt: &str) -> &str {
    prompt.trim().trim_end_matches(':').trim_end()
}

/// Reads lines from any `BufRead`, echoing the prompt to `out`. Used for
/// stdin both piped and on a terminal (cooked mode, so Ctrl-D is a 0-byte
/// read); EOF ends the session.
pub struct ReaderInput<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> ReaderInput<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        ReaderInput { reader, out }
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// A fixed list of lines; `None` once exhausted. Prompts are recorded so
/// callers can check what the user would have seen.
#[derive(Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// Line reader over the process's stdin and stdout.
pub type StdinInput = ReaderInput<StdinLock<'static>, Stdout>;

pub fn stdin_lines() -> StdinInput {
    ReaderInput::new(io::stdin().lock(), io::stdout())
}

/// Whether the base URL should be asked with a dialoguer prompt.
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}
