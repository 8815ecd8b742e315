use mockito::{Matcher, Server};
use ragchat_cli::api::ApiClient;
use ragchat_cli::config::{ClientConfig, Session};
use ragchat_cli::input::ScriptedInput;
use ragchat_cli::ui::{self, Repl, ReplState, QUESTION_PROMPT};
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;

fn test_config() -> ClientConfig {
    ClientConfig {
        timeout: Duration::from_secs(5),
        turn_delay: Duration::ZERO,
    }
}

/// Run a whole session: base URL line first, then the questions.
fn run_session(lines: Vec<String>, config: &ClientConfig) -> (String, ScriptedInput, ReplState) {
    let mut input = ScriptedInput::new(lines);
    let session = ui::initialize(&mut input).unwrap().unwrap();
    let api = ApiClient::new(session, config).unwrap();
    let mut repl = Repl::new(api, config, Vec::new());
    repl.run(&mut input).unwrap();
    let state = repl.state();
    let out = String::from_utf8(repl.into_output()).unwrap();
    (out, input, state)
}

#[test]
fn full_turn_prints_progress_answer_and_farewell() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({"question": "Who wrote the guide?"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"answer": "Douglas.", "sources": ["hhgttg.txt", "wiki/adams.md"]}"#)
        .create();

    let base = format!("{}/", server.url());
    let (out, input, state) = run_session(
        vec![base, "Who wrote the guide?".into(), "exit".into()],
        &test_config(),
    );

    mock.assert();
    assert_eq!(state, ReplState::Terminated);
    let expected = format!(
        "Connected to {}\n[Retrieving context...]\n[Calling LLM...]\n\nAnswer: Douglas.\nSources: hhgttg.txt, wiki/adams.md\nbye\n",
        server.url()
    );
    assert_eq!(out, expected);
    assert_eq!(input.prompts[1..], [QUESTION_PROMPT, QUESTION_PROMPT]);
}

#[test]
fn every_exit_spelling_ends_without_a_request() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/chat").expect(0).create();

    for cmd in ["exit", "EXIT", "quit", "Quit"] {
        let (out, _, state) = run_session(vec![server.url(), cmd.into()], &test_config());
        assert_eq!(state, ReplState::Terminated);
        assert!(out.ends_with("bye\n"), "{cmd}: {out}");
        assert!(!out.contains("[Calling LLM...]"), "{cmd}: {out}");
    }
    mock.assert();
}

#[test]
fn empty_question_is_still_sent() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({"question": ""})))
        .with_status(200)
        .with_body(r#"{"answer": "Ask me something."}"#)
        .create();

    let (out, input, _) = run_session(vec![server.url(), "".into(), "quit".into()], &test_config());

    mock.assert();
    assert!(out.contains("Answer: Ask me something.\nSources:\n"), "{out}");
    // Re-prompted after the empty question.
    assert_eq!(input.prompts.len(), 3);
}

#[test]
fn errors_do_not_end_the_loop() {
    let mut server = Server::new();
    let failing = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({"question": "first"})))
        .with_status(503)
        .with_body("model loading")
        .create();
    let garbled = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({"question": "second"})))
        .with_status(200)
        .with_body("not json")
        .create();
    let ok = server
        .mock("POST", "/chat")
        .match_body(Matcher::Json(json!({"question": "third"})))
        .with_status(200)
        .with_body(r#"{"answer": "fine now", "sources": []}"#)
        .create();

    let (out, _, state) = run_session(
        vec![
            server.url(),
            "first".into(),
            "second".into(),
            "third".into(),
            "exit".into(),
        ],
        &test_config(),
    );

    failing.assert();
    garbled.assert();
    ok.assert();
    assert_eq!(state, ReplState::Terminated);

    let errors: Vec<&str> = out
        .lines()
        .filter(|l| l.starts_with("Request error: "))
        .collect();
    assert_eq!(errors.len(), 2, "{out}");
    assert!(errors[0].contains("503"), "{out}");
    assert!(errors[1].contains("invalid response body"), "{out}");
    assert!(out.contains("Answer: fine now\nSources:\n"), "{out}");
    assert!(out.ends_with("bye\n"));
}

#[test]
fn end_of_input_terminates_gracefully() {
    let mut server = Server::new();
    server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(r#"{"answer": "ok"}"#)
        .create();

    let (out, input, state) = run_session(vec![server.url(), "one question".into()], &test_config());

    assert_eq!(state, ReplState::Terminated);
    assert!(out.contains("Answer: ok"), "{out}");
    assert!(out.ends_with("bye\n"), "{out}");
    assert_eq!(input.prompts.len(), 3);
}

#[test]
fn unreachable_server_is_reported_and_loop_continues() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let (out, _, state) = run_session(
        vec![
            format!("http://127.0.0.1:{}", port),
            "anyone there?".into(),
            "still nobody?".into(),
            "quit".into(),
        ],
        &test_config(),
    );

    assert_eq!(state, ReplState::Terminated);
    let errors = out
        .lines()
        .filter(|l| l.starts_with("Request error: network error"))
        .count();
    assert_eq!(errors, 2, "{out}");
}

#[test]
fn timeout_is_reported_and_loop_continues() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = ClientConfig {
        timeout: Duration::from_millis(200),
        turn_delay: Duration::ZERO,
    };

    let (out, _, state) = run_session(
        vec![
            format!("http://{}", listener.local_addr().unwrap()),
            "slow one".into(),
            "exit".into(),
        ],
        &config,
    );

    assert_eq!(state, ReplState::Terminated);
    assert!(out.contains("Request error: request timed out"), "{out}");
    assert!(out.ends_with("bye\n"));
}

#[test]
fn session_normalization_is_visible_in_banner() {
    let session = Session::from_input("https://abc.ngrok.io/").unwrap();
    let api = ApiClient::new(session, &test_config()).unwrap();
    let mut repl = Repl::new(api, &test_config(), Vec::new());
    let mut input = ScriptedInput::new(["exit"]);
    repl.run(&mut input).unwrap();
    let out = String::from_utf8(repl.into_output()).unwrap();
    assert_eq!(out, "Connected to https://abc.ngrok.io\nbye\n");
}
