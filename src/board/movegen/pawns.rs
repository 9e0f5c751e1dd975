use super::super::{Board, Move, MoveList, Square, PROMOTION_PIECES};

impl Board {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let dir = color.pawn_direction();
        let start_rank = color.pawn_start_rank();
        let promotion_rank = color.pawn_promotion_rank();

        let r = from.0 as isize;
        let f = from.1 as isize;

        let forward_r = r + dir;
        if (0..8).contains(&forward_r) {
            let forward_sq = Square(forward_r as usize, f as usize);
            if self.is_empty(forward_sq) {
                if forward_sq.0 == promotion_rank {
                    for promo in PROMOTION_PIECES {
                        moves.push(Move::new_promotion(from, forward_sq, promo));
                    }
                } else {
                    moves.push(Move::quiet(from, forward_sq));
                    if r == start_rank as isize {
                        let double_forward_sq = Square((r + 2 * dir) as usize, f as usize);
                        if self.is_empty(double_forward_sq) {
                            moves.push(Move::double_pawn_push(from, double_forward_sq));
                        }
                    }
                }
            }
        }

        if (0..8).contains(&forward_r) {
            for df in [-1, 1] {
                let capture_f = f + df;
                if (0..8).contains(&capture_f) {
                    let target_sq = Square(forward_r as usize, capture_f as usize);
                    if let Some((target_color, _)) = self.piece_at(target_sq) {
                        if target_color != color {
                            if target_sq.0 == promotion_rank {
                                for promo in PROMOTION_PIECES {
                                    moves.push(Move::new_promotion_capture(
                                        from, target_sq, promo,
                                    ));
                                }
                            } else {
                                moves.push(Move::capture(from, target_sq));
                            }
                        }
                    } else if Some(target_sq) == self.en_passant_target {
                        moves.push(Move::en_passant(from, target_sq));
                    }
                }
            }
        }
    }
}
