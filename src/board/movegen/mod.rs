mod kings;
mod knights;
mod pawns;
mod sliders;

pub(crate) use sliders::SliderType;

use super::{pop_lsb, Board, Color, Move, MoveList, Piece, Square};

impl Board {
    /// Quiet or capture, depending on what sits on `to`.
    pub(crate) fn create_simple_move(&self, from: Square, to: Square) -> Move {
        if self.is_empty(to) {
            Move::quiet(from, to)
        } else {
            Move::capture(from, to)
        }
    }

    pub(crate) fn generate_pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.current_color();
        let c_idx = color.index();

        let mut pawns = self.pieces[c_idx][Piece::Pawn.index()];
        while pawns.0 != 0 {
            let from = Square::from_index(pop_lsb(&mut pawns));
            self.generate_pawn_moves(from, &mut moves);
        }

        let mut knights = self.pieces[c_idx][Piece::Knight.index()];
        while knights.0 != 0 {
            let from = Square::from_index(pop_lsb(&mut knights));
            self.generate_knight_moves(from, &mut moves);
        }

        let mut bishops = self.pieces[c_idx][Piece::Bishop.index()];
        while bishops.0 != 0 {
            let from = Square::from_index(pop_lsb(&mut bishops));
            self.generate_slider_moves(from, SliderType::Bishop, &mut moves);
        }

        let mut rooks = self.pieces[c_idx][Piece::Rook.index()];
        while rooks.0 != 0 {
            let from = Square::from_index(pop_lsb(&mut rooks));
            self.generate_slider_moves(from, SliderType::Rook, &mut moves);
        }

        let mut queens = self.pieces[c_idx][Piece::Queen.index()];
        while queens.0 != 0 {
            let from = Square::from_index(pop_lsb(&mut queens));
            self.generate_slider_moves(from, SliderType::Queen, &mut moves);
        }

        let mut kings = self.pieces[c_idx][Piece::King.index()];
        while kings.0 != 0 {
            let from = Square::from_index(pop_lsb(&mut kings));
            self.generate_king_moves(from, &mut moves);
        }
        moves
    }

    /// Generate all legal moves for the side to move.
    ///
    /// Pseudo-legal moves are filtered by applying each one and testing
    /// whether the mover's king is left in check. Castling additionally
    /// requires the start, transit, and end squares to be unattacked.
    pub fn generate_moves(&mut self) -> MoveList {
        let current_color = self.current_color();
        let opponent_color = self.opponent_color(current_color);
        let pseudo_moves = self.generate_pseudo_moves();
        let mut legal_moves = MoveList::new();

        for m in pseudo_moves.iter() {
            if m.is_castling() {
                let from = m.from();
                let to = m.to();
                let king_mid_sq = Square(from.0, (from.1 + to.1) / 2);

                if self.is_square_attacked(from, opponent_color)
                    || self.is_square_attacked(king_mid_sq, opponent_color)
                    || self.is_square_attacked(to, opponent_color)
                {
                    continue;
                }
            }

            let info = self.make_move(*m);
            if !self.is_in_check(current_color) {
                legal_moves.push(*m);
            }
            self.unmake_move(*m, info);
        }
        legal_moves
    }

    pub fn is_checkmate(&mut self) -> bool {
        let color = self.current_color();
        self.is_in_check(color) && self.generate_moves().is_empty()
    }

    pub fn is_stalemate(&mut self) -> bool {
        let color = self.current_color();
        !self.is_in_check(color) && self.generate_moves().is_empty()
    }

    /// Count leaf nodes of the legal move tree to the given depth.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for m in moves.iter() {
            let info = self.make_move(*m);
            nodes += self.perft(depth - 1);
            self.unmake_move(*m, info);
        }

        nodes
    }
}
