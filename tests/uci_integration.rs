//! End-to-end UCI protocol tests against the compiled binary.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdout, Command, Stdio};

use garnet::uci::try_parse_position_command;

struct Engine {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<ChildStdout>,
}

impl Engine {
    fn spawn() -> Self {
        let exe = env!("CARGO_BIN_EXE_garnet");
        let mut child = Command::new(exe)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("failed to spawn engine binary");
        let stdin = child.stdin.take().unwrap();
        let reader = BufReader::new(child.stdout.take().unwrap());
        Engine {
            child,
            stdin,
            reader,
        }
    }

    fn send(&mut self, command: &str) {
        self.stdin
            .write_all(format!("{command}\n").as_bytes())
            .unwrap();
        self.stdin.flush().unwrap();
    }

    /// Read lines until one starts with `prefix`, returning that line.
    fn read_until(&mut self, prefix: &str) -> String {
        loop {
            let mut line = String::new();
            let bytes = self.reader.read_line(&mut line).expect("read failed");
            assert_ne!(bytes, 0, "engine exited before '{prefix}' line");
            if line.starts_with(prefix) {
                return line.trim().to_string();
            }
        }
    }

    fn quit(mut self) {
        self.send("quit");
        let _ = self.child.wait();
    }
}

#[test]
fn identifies_itself_and_reports_ready() {
    let mut engine = Engine::spawn();

    engine.send("uci");
    let uciok = engine.read_until("uciok");
    assert_eq!(uciok, "uciok");

    engine.send("isready");
    assert_eq!(engine.read_until("readyok"), "readyok");

    engine.send("ucinewgame");
    assert_eq!(engine.read_until("readyok"), "readyok");

    engine.quit();
}

#[test]
fn go_returns_exactly_one_legal_bestmove() {
    let mut engine = Engine::spawn();

    engine.send("position startpos moves e2e4 e7e5");
    engine.send("go depth 3");
    let bestmove = engine.read_until("bestmove");
    engine.quit();

    let parts: Vec<&str> = bestmove.split_whitespace().collect();
    assert_eq!(parts.len(), 2, "unexpected bestmove line: {bestmove}");
    let mv = parts[1];
    assert_ne!(mv, "0000");

    // The reported move must be legal in the resulting position.
    let mut board =
        try_parse_position_command(&["position", "startpos", "moves", "e2e4", "e7e5"]).unwrap();
    assert!(
        board.parse_move(mv).is_ok(),
        "engine returned illegal move {mv}"
    );
}

#[test]
fn go_movetime_also_produces_bestmove() {
    let mut engine = Engine::spawn();

    engine.send("position startpos");
    engine.send("go movetime 100");
    let bestmove = engine.read_until("bestmove");
    engine.quit();

    assert!(bestmove.starts_with("bestmove "));
    assert_ne!(bestmove, "bestmove 0000");
}

#[test]
fn mated_position_reports_null_move() {
    let mut engine = Engine::spawn();

    engine.send("position fen R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    engine.send("go depth 2");
    let bestmove = engine.read_until("bestmove");
    engine.quit();

    assert_eq!(bestmove, "bestmove 0000");
}

#[test]
fn perft_reports_startpos_node_count() {
    let mut engine = Engine::spawn();

    engine.send("position startpos");
    engine.send("perft 1");
    let nodes = engine.read_until("nodes");
    assert_eq!(nodes, "nodes 20");

    engine.send("perft 2");
    let nodes = engine.read_until("nodes");
    assert_eq!(nodes, "nodes 400");

    engine.quit();
}

#[test]
fn illegal_moves_in_position_are_skipped() {
    let mut engine = Engine::spawn();

    // e2e5 is not a legal move from the start; the session must report
    // it, skip it, and still search the remaining position.
    engine.send("position startpos moves e2e5 d2d4");
    let info = engine.read_until("info string");
    assert!(info.contains("e2e5"), "expected a diagnostic, got: {info}");

    engine.send("go depth 2");
    let bestmove = engine.read_until("bestmove");
    engine.quit();

    assert!(bestmove.starts_with("bestmove "));
    assert_ne!(bestmove, "bestmove 0000");
}

#[test]
fn unknown_setoption_degrades_to_diagnostic() {
    let mut engine = Engine::spawn();

    engine.send("setoption name Hash value 64");
    let info = engine.read_until("info string");
    assert!(info.contains("unknown option"));

    // The session keeps working afterwards.
    engine.send("isready");
    assert_eq!(engine.read_until("readyok"), "readyok");

    engine.quit();
}

#[test]
fn stop_during_search_still_yields_bestmove() {
    let mut engine = Engine::spawn();

    engine.send("position startpos");
    engine.send("go depth 30");
    engine.send("stop");
    let bestmove = engine.read_until("bestmove");
    engine.quit();

    assert!(bestmove.starts_with("bestmove "));
    assert_ne!(bestmove, "bestmove 0000");
}
