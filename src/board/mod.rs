//! Board representation and core chess logic.
//!
//! Bitboard position state, legal move generation, reversible
//! make/unmake with incremental zobrist hashing, draw and terminal
//! detection, NNUE evaluation and the best-move search.

mod attack_tables;
mod error;
mod fen;
mod history;
mod make_unmake;
mod movegen;
mod rules;
mod state;
mod types;

pub mod nnue;
pub mod search;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError};
pub use rules::GameOutcome;
pub use state::{Board, UnmakeInfo};
pub use types::{
    Bitboard, BitboardIter, Color, Move, MoveList, Piece, ScoredMove, ScoredMoveList, Square,
    SquareIdx,
};

pub(crate) use types::{
    bit_for_square, castle_bit, file_to_index, pop_lsb, rank_to_index, CASTLE_ALL, CASTLE_BLACK_K,
    CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q, MAX_PLY, PROMOTION_PIECES,
};
