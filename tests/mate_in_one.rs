//! Mate-in-one problem suite loaded from JSON.

use std::sync::atomic::AtomicBool;

use serde::Deserialize;

use garnet::board::search::{search, SearchSettings, MATE_THRESHOLD};
use garnet::Board;

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    fen: String,
    moves: String,
}

fn uci_from_problem_moves(moves: &str) -> String {
    moves.replace('-', "")
}

fn load_problems() -> Vec<Problem> {
    let data = include_str!("data/problems.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid problems.json");
    set.problems
}

#[test]
fn mate_in_one_moves_deliver_mate() {
    for problem in load_problems().iter().filter(|p| p.kind == "Mate in One") {
        let mut board = Board::from_fen(&problem.fen);
        let uci = uci_from_problem_moves(&problem.moves);
        board
            .make_move_uci(&uci)
            .unwrap_or_else(|e| panic!("bad move in '{}': {e}", problem.name));

        assert!(
            board.is_checkmate(),
            "'{}' is not mate after {}: {}",
            problem.name,
            problem.moves,
            board.to_fen()
        );
    }
}

#[test]
fn search_finds_every_mate_in_one() {
    let stop = AtomicBool::new(false);

    for problem in load_problems().iter().filter(|p| p.kind == "Mate in One") {
        let mut board = Board::from_fen(&problem.fen);
        let result = search(&mut board, &SearchSettings::fixed_depth(2), &stop);

        assert!(
            result.score >= MATE_THRESHOLD,
            "'{}': expected mate score, got {}",
            problem.name,
            result.score
        );

        // The returned move must itself be mating.
        let best = result.best_move.expect("no move returned");
        board.make_move(best);
        assert!(
            board.is_checkmate(),
            "'{}': best move {best} does not mate",
            problem.name
        );
    }
}
