// Library root
// -----------
// A small command-line client for a remote RAG chat endpoint. The binary
// (`main.rs`) wires these modules into the interactive loop.
//
// Module responsibilities:
// - `config`: the normalized base URL (`Session`) and client tunables.
// - `api`: the blocking `POST /chat` call and its response model.
// - `error`: what can go wrong during one question round trip.
// - `input`: where lines come from (terminal, piped stdin, test scripts).
// - `ui`: the question/answer loop and how results are printed.
// - `logging`: stderr diagnostics.
pub mod api;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod ui;
