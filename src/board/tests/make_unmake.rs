//! Make/unmake move tests.

use crate::board::{Board, Color, Move, Piece, Square, UnmakeInfo};
use rand::prelude::*;

fn find_move(board: &mut Board, from: Square, to: Square, promotion: Option<Piece>) -> Move {
    for m in board.generate_moves().iter() {
        if m.from() == from && m.to() == to && m.promotion() == promotion {
            return *m;
        }
    }
    panic!("Expected move not found");
}

#[test]
fn test_en_passant_make_unmake() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let original_hash = board.hash();
    let original_ep = board.en_passant_target;
    let mv = find_move(&mut board, Square(4, 4), Square(5, 5), None);
    assert!(mv.is_en_passant());
    let info = board.make_move(mv);
    assert_eq!(board.piece_at(Square(4, 5)), None, "captured pawn removed");
    board.unmake_move(mv, info);
    assert_eq!(board.hash(), original_hash);
    assert_eq!(board.en_passant_target, original_ep);
    assert_eq!(
        board.piece_at(Square(4, 5)),
        Some((Color::Black, Piece::Pawn))
    );
}

#[test]
fn test_promotion_make_unmake() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let original_hash = board.hash();
    let mv = find_move(&mut board, Square(6, 0), Square(7, 0), Some(Piece::Queen));
    let info = board.make_move(mv);
    assert_eq!(
        board.piece_at(Square(7, 0)),
        Some((Color::White, Piece::Queen))
    );
    board.unmake_move(mv, info);
    assert_eq!(board.hash(), original_hash);
    assert_eq!(
        board.piece_at(Square(6, 0)),
        Some((Color::White, Piece::Pawn))
    );
}

#[test]
fn test_castling_make_unmake() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let original_hash = board.hash();
    let original_rights = board.castling_rights;

    let mv = find_move(&mut board, Square(0, 4), Square(0, 6), None);
    assert!(mv.is_castling());
    let info = board.make_move(mv);
    assert_eq!(
        board.piece_at(Square(0, 6)),
        Some((Color::White, Piece::King))
    );
    assert_eq!(
        board.piece_at(Square(0, 5)),
        Some((Color::White, Piece::Rook))
    );
    assert!(!board.has_castling_right(Color::White, 'K'));

    board.unmake_move(mv, info);
    assert_eq!(board.hash(), original_hash);
    assert_eq!(board.castling_rights, original_rights);
    assert_eq!(
        board.piece_at(Square(0, 7)),
        Some((Color::White, Piece::Rook))
    );
}

#[test]
fn test_rook_capture_clears_castling_right() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/6b1/R3K2R b KQkq - 0 1");
    let mv = find_move(&mut board, Square(1, 6), Square(0, 7), None);
    let info = board.make_move(mv);
    assert!(!board.has_castling_right(Color::White, 'K'));
    assert!(board.has_castling_right(Color::White, 'Q'));
    board.unmake_move(mv, info);
    assert!(board.has_castling_right(Color::White, 'K'));
}

#[test]
fn test_legal_moves_stable_after_make_unmake() {
    let mut board = Board::new();
    let initial_moves = board.generate_moves();
    let mut initial_list: Vec<String> = initial_moves.iter().map(|m| m.to_string()).collect();
    initial_list.sort();

    for mv in initial_moves.iter() {
        let info = board.make_move(*mv);
        board.unmake_move(*mv, info);
    }

    let after_moves = board.generate_moves();
    let mut after_list: Vec<String> = after_moves.iter().map(|m| m.to_string()).collect();
    after_list.sort();

    assert_eq!(initial_list, after_list);
}

#[test]
fn test_hash_matches_recompute_after_random_moves() {
    let mut board = Board::new();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut history: Vec<(Move, UnmakeInfo)> = Vec::new();

    for _ in 0..50 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..moves.len());
        let mv = moves[idx];
        let info = board.make_move(mv);
        history.push((mv, info));

        let recomputed = board.calculate_initial_hash();
        assert_eq!(board.hash(), recomputed);
    }

    while let Some((mv, info)) = history.pop() {
        board.unmake_move(mv, info);
        let recomputed = board.calculate_initial_hash();
        assert_eq!(board.hash(), recomputed);
    }
}

#[test]
fn test_random_playout_round_trip_state() {
    let mut board = Board::new();
    let initial_fen = board.to_fen();
    let initial_hash = board.hash();
    let initial_halfmove = board.halfmove_clock();
    let initial_castling = board.castling_rights;
    let initial_ep = board.en_passant_target;
    let initial_rep = board.repetition_counts.get(initial_hash);
    let initial_pieces = board.pieces;

    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut history: Vec<(Move, UnmakeInfo)> = Vec::new();

    for _ in 0..200 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..moves.len());
        let mv = moves[idx];
        let info = board.make_move(mv);
        history.push((mv, info));
    }

    while let Some((mv, info)) = history.pop() {
        board.unmake_move(mv, info);
    }

    assert_eq!(board.to_fen(), initial_fen);
    assert_eq!(board.hash(), initial_hash);
    assert_eq!(board.halfmove_clock(), initial_halfmove);
    assert_eq!(board.castling_rights, initial_castling);
    assert_eq!(board.en_passant_target, initial_ep);
    assert_eq!(board.repetition_counts.get(initial_hash), initial_rep);

    for c in 0..2 {
        for p in 0..6 {
            assert_eq!(board.pieces[c][p].0, initial_pieces[c][p].0);
        }
    }
}

#[test]
fn test_occupancy_aggregates_stay_consistent() {
    let mut board = Board::new();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(mv);

        let mut white = 0u64;
        let mut black = 0u64;
        for p in 0..6 {
            assert_eq!(
                board.pieces[0][p].0 & board.pieces[1][p].0,
                0,
                "piece bitboards overlap"
            );
            white |= board.pieces[0][p].0;
            black |= board.pieces[1][p].0;
        }
        assert_eq!(board.occupied[0].0, white);
        assert_eq!(board.occupied[1].0, black);
        assert_eq!(board.all_occupied.0, white | black);
    }
}

#[test]
fn test_halfmove_clock_resets_on_pawn_move_and_capture() {
    let mut board = Board::from_fen(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 7 10",
    );
    assert_eq!(board.halfmove_clock(), 7);

    // Knight move increments the clock
    let mv = find_move(&mut board, Square(0, 1), Square(2, 2), None);
    let info = board.make_move(mv);
    assert_eq!(board.halfmove_clock(), 8);
    board.unmake_move(mv, info);
    assert_eq!(board.halfmove_clock(), 7);

    // Pawn move resets it
    let mv = find_move(&mut board, Square(1, 4), Square(3, 4), None);
    let info = board.make_move(mv);
    assert_eq!(board.halfmove_clock(), 0);
    board.unmake_move(mv, info);
    assert_eq!(board.halfmove_clock(), 7);
}
