//! Universal Chess Interface (UCI) protocol implementation.
//!
//! Handles communication with chess GUIs following the UCI specification.

use std::fmt;
use std::io::{self, BufRead, Write};

use log::warn;

use crate::board::search::SearchSettings;
use crate::board::{Board, FenError};
use crate::engine::EngineController;

pub mod command;
pub mod options;

use command::{parse_uci_command, UciCommand};
use options::{parse_setoption, UciOptions};

/// Error type for UCI position command parsing
#[derive(Debug, Clone)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Missing required parts in the command
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "invalid FEN: {e}"),
            UciError::MissingParts => write!(f, "missing required parts in position command"),
        }
    }
}

impl std::error::Error for UciError {}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Parse a UCI position command into a fresh board.
///
/// Supports both "position startpos" and "position fen <fen>" formats,
/// optionally followed by "moves <move1> <move2> ...". Malformed or
/// illegal move tokens are reported via `info string` and skipped; they
/// never abort the command.
pub fn try_parse_position_command(parts: &[&str]) -> Result<Board, UciError> {
    let mut i = 1;

    if i >= parts.len() {
        return Err(UciError::MissingParts);
    }

    let mut board = if parts[i] == "startpos" {
        i += 1;
        Board::new()
    } else if parts[i] == "fen" {
        if i + 6 >= parts.len() {
            return Err(UciError::MissingParts);
        }
        let fen = parts[i + 1..i + 7].join(" ");
        i += 7;
        Board::try_from_fen(&fen)?
    } else {
        return Err(UciError::MissingParts);
    };

    if i < parts.len() && parts[i] == "moves" {
        i += 1;
        while i < parts.len() {
            match board.make_move_uci(parts[i]) {
                Ok(_) => {}
                Err(e) => {
                    println!("info string skipping move '{}': {e}", parts[i]);
                    warn!("position command: skipping move '{}': {e}", parts[i]);
                }
            }
            i += 1;
        }
    }

    Ok(board)
}

/// Parse `go` arguments, overriding the configured settings for this
/// search only. `go depth N` forces a fixed-depth search; `go movetime N`
/// sets the time budget for the iterative deepening loop.
fn parse_go_settings(parts: &[String], configured: SearchSettings) -> SearchSettings {
    let mut settings = configured;

    let mut i = 1;
    while i < parts.len() {
        match parts[i].as_str() {
            "depth" => {
                if let Some(d) = parts.get(i + 1).and_then(|v| v.parse::<u32>().ok()) {
                    settings = SearchSettings::fixed_depth(d.clamp(1, 64));
                }
                i += 2;
            }
            "movetime" => {
                if let Some(ms) = parts.get(i + 1).and_then(|v| v.parse::<u64>().ok()) {
                    settings.movetime_ms = ms;
                }
                i += 2;
            }
            _ => i += 1,
        }
    }

    settings
}

/// Run the UCI protocol loop over stdin/stdout until `quit` or EOF.
pub fn run_uci_loop() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut controller = EngineController::new();
    let mut options = UciOptions::default();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(cmd) = parse_uci_command(&line) else {
            continue;
        };

        match cmd {
            UciCommand::Uci => options.print(),
            UciCommand::IsReady => println!("readyok"),
            UciCommand::UciNewGame => {
                controller.new_game();
                println!("readyok");
            }
            UciCommand::Position(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                match try_parse_position_command(&parts) {
                    Ok(board) => controller.set_board(board),
                    Err(e) => println!("info string {e}"),
                }
            }
            UciCommand::Go(parts) => {
                controller.stop_search();
                let settings = parse_go_settings(&parts, options.settings());
                controller.start_search(settings, |result| {
                    match result.best_move {
                        Some(m) => println!("bestmove {m}"),
                        None => println!("bestmove 0000"),
                    }
                    io::stdout().flush().ok();
                });
            }
            UciCommand::Perft(depth) => {
                let mut board = controller.board().clone();
                let nodes = board.perft(depth as usize);
                println!("nodes {nodes}");
            }
            UciCommand::SetOption(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                if let Some((name, value)) = parse_setoption(&parts) {
                    options.apply_setoption(&name, value.as_deref());
                } else {
                    println!("info string malformed setoption command");
                }
            }
            UciCommand::Stop => controller.signal_stop(),
            UciCommand::Quit => break,
            UciCommand::Unknown(text) => println!("info string unknown command '{text}'"),
        }

        stdout.flush().ok();
    }

    controller.stop_search();
}
