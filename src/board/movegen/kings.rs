use super::super::attack_tables::{slider_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::super::{Bitboard, Board, Color, Move, MoveList, Piece, Square};

impl Board {
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let back_rank = color.back_rank();
        let from_idx = from.index().as_usize();
        let own_occ = self.occupied[color.index()].0;
        let targets = Bitboard(KING_ATTACKS[from_idx] & !own_occ);

        for to_idx in targets.iter() {
            let to_sq = Square::from_index(to_idx);
            moves.push(self.create_simple_move(from, to_sq));
        }

        // Castling: rights intact, path empty, rook on its home square.
        // Attack checks on the transit squares happen in the legality filter.
        if from == Square(back_rank, 4) {
            if self.has_castling_right(color, 'K')
                && self.is_empty(Square(back_rank, 5))
                && self.is_empty(Square(back_rank, 6))
                && self.piece_at(Square(back_rank, 7)) == Some((color, Piece::Rook))
            {
                moves.push(Move::castle_kingside(from, Square(back_rank, 6)));
            }
            if self.has_castling_right(color, 'Q')
                && self.is_empty(Square(back_rank, 1))
                && self.is_empty(Square(back_rank, 2))
                && self.is_empty(Square(back_rank, 3))
                && self.piece_at(Square(back_rank, 0)) == Some((color, Piece::Rook))
            {
                moves.push(Move::castle_queenside(from, Square(back_rank, 2)));
            }
        }
    }

    pub(crate) fn find_king(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][Piece::King.index()];
        kings.iter().next().map(Square::from_index)
    }

    /// Returns true if `square` is attacked by any piece of `attacker_color`.
    ///
    /// Leapers are tested by reverse table lookup (a pawn attacks `square`
    /// exactly when a pawn of the opposite color on `square` would attack
    /// the pawn's square); sliders by ray walk over the occupancy.
    pub(crate) fn is_square_attacked(&self, square: Square, attacker_color: Color) -> bool {
        let target_idx = square.index().as_usize();
        let c_idx = attacker_color.index();

        let pawn_sources = PAWN_ATTACKS[attacker_color.opponent().index()][target_idx];
        if self.pieces[c_idx][Piece::Pawn.index()].0 & pawn_sources != 0 {
            return true;
        }

        if self.pieces[c_idx][Piece::Knight.index()].0 & KNIGHT_ATTACKS[target_idx] != 0 {
            return true;
        }

        if self.pieces[c_idx][Piece::King.index()].0 & KING_ATTACKS[target_idx] != 0 {
            return true;
        }

        let rook_like = self.pieces[c_idx][Piece::Rook.index()].0
            | self.pieces[c_idx][Piece::Queen.index()].0;
        let bishop_like = self.pieces[c_idx][Piece::Bishop.index()].0
            | self.pieces[c_idx][Piece::Queen.index()].0;

        if slider_attacks(target_idx, self.all_occupied.0, false) & rook_like != 0 {
            return true;
        }
        if slider_attacks(target_idx, self.all_occupied.0, true) & bishop_like != 0 {
            return true;
        }

        false
    }

    pub(crate) fn is_in_check(&self, color: Color) -> bool {
        if let Some(king_sq) = self.find_king(color) {
            self.is_square_attacked(king_sq, self.opponent_color(color))
        } else {
            false
        }
    }

    /// Returns true if the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.current_color())
    }
}
