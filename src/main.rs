// Entrypoint for the CLI application.
// - Keeps `main` small: read the base URL, build the API client and hand it
//   to the question loop.
// - Returns `anyhow::Result`; request failures never reach this level.

use anyhow::Context;
use ragchat_cli::{
    api::ApiClient,
    config::ClientConfig,
    input::{stdin_is_terminal, stdin_lines, TerminalInput},
    logging,
    ui::{self, Repl},
};
use std::io::{self, IsTerminal};

fn main() -> anyhow::Result<()> {
    logging::init_logging()?;

    // Questions are read in cooked mode so Ctrl-D ends the session; the
    // dialoguer prompt is only used for the base URL.
    let mut lines = stdin_lines();
    let base_url = if stdin_is_terminal() {
        ui::initialize(&mut TerminalInput)?
    } else {
        ui::initialize(&mut lines)?
    };
    let Some(session) = base_url else {
        tracing::debug!("input ended before a base URL was given");
        return Ok(());
    };

    let config = ClientConfig::default();
    let api = ApiClient::new(session, &config)?;
    tracing::info!(base_url = %api.session(), "session started");

    let mut repl = Repl::new(api, &config, io::stdout()).with_spinner(io::stderr().is_terminal());
    repl.run(&mut lines).context("Failed to write to stdout")?;
    Ok(())
}
