//! Terminal-state detection and draw rules.

use super::{Bitboard, Color, Piece};
use crate::board::Board;

/// Occurrence count at which a position is an official repetition draw.
pub(crate) const REPETITION_DRAW_THRESHOLD: u32 = 3;

/// Occurrence count at which a search line treats a position as drawn.
/// Deliberately stricter than the official rule: once a position repeats
/// at all inside a line, searching past it gains nothing.
pub(crate) const SEARCH_REPETITION_THRESHOLD: u32 = 2;

/// Final (or ongoing) state of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    /// Side to move is in check with no legal moves
    Checkmate,
    /// Side to move has no legal moves but is not in check
    Stalemate,
    /// One hundred halfmoves without a capture or pawn move
    FiftyMoveRule,
    /// Current position has occurred three or more times
    Threefold,
    /// Neither side can possibly deliver mate
    InsufficientMaterial,
}

impl GameOutcome {
    /// Returns true for any outcome other than `InProgress`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::InProgress
    }
}

impl Board {
    /// Classify the current position. Checkmate and stalemate take
    /// precedence over the draw rules, then fifty-move, threefold,
    /// insufficient material, in that order.
    pub fn outcome(&mut self) -> GameOutcome {
        if self.generate_moves().is_empty() {
            return if self.in_check() {
                GameOutcome::Checkmate
            } else {
                GameOutcome::Stalemate
            };
        }
        if self.is_fifty_move_draw() {
            return GameOutcome::FiftyMoveRule;
        }
        if self.is_repetition_draw() {
            return GameOutcome::Threefold;
        }
        if self.is_insufficient_material() {
            return GameOutcome::InsufficientMaterial;
        }
        GameOutcome::InProgress
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Official threefold repetition (current position seen three times).
    pub fn is_repetition_draw(&self) -> bool {
        self.repetition_counts.get(self.hash) >= REPETITION_DRAW_THRESHOLD
    }

    /// In-search repetition cutoff (current position seen at all before).
    pub(crate) fn is_search_repetition(&self) -> bool {
        self.repetition_counts.get(self.hash) >= SEARCH_REPETITION_THRESHOLD
    }

    /// Neither side has mating material: no pawns, rooks, or queens, and
    /// at most one minor piece in total, or exactly one bishop per side
    /// with both bishops on same-colored squares and no knights left (a
    /// remaining knight keeps mating positions reachable).
    pub fn is_insufficient_material(&self) -> bool {
        let white = Color::White.index();
        let black = Color::Black.index();

        let pawns =
            self.pieces[white][Piece::Pawn.index()].0 | self.pieces[black][Piece::Pawn.index()].0;
        let rooks =
            self.pieces[white][Piece::Rook.index()].0 | self.pieces[black][Piece::Rook.index()].0;
        let queens =
            self.pieces[white][Piece::Queen.index()].0 | self.pieces[black][Piece::Queen.index()].0;

        if pawns != 0 || rooks != 0 || queens != 0 {
            return false;
        }

        let white_knights = self.pieces[white][Piece::Knight.index()].popcount();
        let black_knights = self.pieces[black][Piece::Knight.index()].popcount();
        let white_bishops = self.pieces[white][Piece::Bishop.index()].popcount();
        let black_bishops = self.pieces[black][Piece::Bishop.index()].popcount();

        let total_minors = white_knights + black_knights + white_bishops + black_bishops;

        if total_minors <= 1 {
            return true;
        }

        let total_knights = white_knights + black_knights;

        if total_knights == 0 && white_bishops == 1 && black_bishops == 1 {
            return bishops_all_same_color(
                self.pieces[white][Piece::Bishop.index()].0
                    | self.pieces[black][Piece::Bishop.index()].0,
            );
        }

        false
    }
}

fn bishops_all_same_color(bishops: u64) -> bool {
    (bishops & Bitboard::LIGHT_SQUARES.0 == 0) || (bishops & Bitboard::DARK_SQUARES.0 == 0)
}
