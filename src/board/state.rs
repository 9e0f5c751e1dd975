use super::history::RepetitionTable;
use super::nnue::{NnueAccumulator, NETWORK};
use super::{Bitboard, Color, Piece, Square, CASTLE_ALL};

/// Snapshot of the irreversible parts of the position, returned by
/// `make_move` and consumed by `unmake_move`.
#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    pub(crate) captured_piece_info: Option<(Color, Piece)>,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_castling_rights: u8,
    pub(crate) previous_hash: u64,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) made_hash: u64,
    pub(crate) previous_repetition_count: u32,
}

#[derive(Clone)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) white_to_move: bool,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) castling_rights: u8, // bitmask
    pub(crate) hash: u64,           // Zobrist hash
    pub(crate) halfmove_clock: u32,
    pub(crate) repetition_counts: RepetitionTable,
    pub(crate) accumulator: NnueAccumulator,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (i, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square(0, i), Color::White, *piece);
            board.set_piece(Square(7, i), Color::Black, *piece);
            board.set_piece(Square(1, i), Color::White, Piece::Pawn);
            board.set_piece(Square(6, i), Color::Black, Piece::Pawn);
        }

        board.castling_rights = CASTLE_ALL;
        board.white_to_move = true;
        board.hash = board.calculate_initial_hash();
        board.repetition_counts.set(board.hash, 1);
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard(0); 6]; 2],
            occupied: [Bitboard(0); 2],
            all_occupied: Bitboard(0),
            white_to_move: true,
            en_passant_target: None,
            castling_rights: 0,
            hash: 0,
            halfmove_clock: 0,
            repetition_counts: RepetitionTable::new(),
            accumulator: NnueAccumulator::new(&NETWORK.feature_bias),
        }
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Static evaluation of the position in centipawns, from the
    /// perspective of the side to move.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        NETWORK.evaluate(&self.accumulator, self.white_to_move)
    }

    /// Rebuild the accumulator from scratch from the piece bitboards.
    ///
    /// Incremental updates inside `set_piece`/`remove_piece` keep the
    /// accumulator current; this exists for verification and recovery.
    pub fn refresh_accumulator(&mut self) {
        let mut white_features = Vec::new();
        let mut black_features = Vec::new();
        for color in Color::BOTH {
            let c_idx = color.index();
            for piece in Piece::ALL {
                for sq_idx in self.pieces[c_idx][piece.index()].iter() {
                    let sq = sq_idx.as_usize();
                    white_features.push(super::nnue::feature_index(piece.index(), c_idx, sq, 0));
                    black_features.push(super::nnue::feature_index(piece.index(), c_idx, sq, 1));
                }
            }
        }
        self.accumulator
            .refresh(&white_features, &black_features, &NETWORK);
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_fen())
            .field("hash", &self.hash)
            .finish()
    }
}
