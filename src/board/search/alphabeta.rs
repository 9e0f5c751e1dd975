use crate::board::{Board, Move, Piece, ScoredMoveList};

use super::{DRAW_SCORE, MATE_SCORE};

const INFINITY: i32 = 31_000;

/// Ordering bonus that keeps the previous iteration's best move first.
const PREVIOUS_BEST_BONUS: i32 = 1_000_000;

pub(crate) struct SearchContext<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) nodes: u64,
}

impl SearchContext<'_> {
    /// Search all root moves to `depth`, returning the best move and its
    /// score. `previous_best` from the last iteration is tried first.
    pub(crate) fn root_search(
        &mut self,
        depth: u32,
        previous_best: Option<Move>,
    ) -> (Option<Move>, i32) {
        let moves = self.board.generate_moves();
        if moves.is_empty() {
            let score = if self.board.in_check() {
                -MATE_SCORE
            } else {
                DRAW_SCORE
            };
            return (None, score);
        }

        let mut scored = ScoredMoveList::new();
        for m in moves.iter() {
            let mut score = self.order_score(*m);
            if Some(*m) == previous_best {
                score += PREVIOUS_BEST_BONUS;
            }
            scored.push(*m, score);
        }

        let mut best_move = None;
        let mut alpha = -INFINITY;
        let beta = INFINITY;

        let mut idx = 0;
        while let Some(entry) = scored.pick_best(idx) {
            let m = entry.mv;
            let info = self.board.make_move(m);
            let score = -self.negamax(depth - 1, 1, -beta, -alpha);
            self.board.unmake_move(m, info);

            if score > alpha || best_move.is_none() {
                alpha = score;
                best_move = Some(m);
            }
            idx += 1;
        }

        (best_move, alpha)
    }

    fn negamax(&mut self, depth: u32, ply: u32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        // Draw rules end the line before the horizon is consulted, but
        // checkmate outranks them: a mated side gets no relief from the
        // clock or the material count.
        if self.board.is_fifty_move_draw()
            || self.board.is_search_repetition()
            || self.board.is_insufficient_material()
        {
            if self.board.in_check() && self.board.generate_moves().is_empty() {
                return -(MATE_SCORE - ply as i32);
            }
            return DRAW_SCORE;
        }

        if depth == 0 {
            return self.board.evaluate();
        }

        let moves = self.board.generate_moves();
        if moves.is_empty() {
            return if self.board.in_check() {
                // Mated here; prefer the longest resistance
                -(MATE_SCORE - ply as i32)
            } else {
                DRAW_SCORE
            };
        }

        let mut scored = ScoredMoveList::new();
        for m in moves.iter() {
            scored.push(*m, self.order_score(*m));
        }

        let mut best = -INFINITY;
        let mut idx = 0;
        while let Some(entry) = scored.pick_best(idx) {
            let m = entry.mv;
            let info = self.board.make_move(m);
            let score = -self.negamax(depth - 1, ply + 1, -beta, -alpha);
            self.board.unmake_move(m, info);

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
            idx += 1;
        }

        best
    }

    /// MVV-LVA: most valuable victim first, least valuable attacker
    /// breaking ties. Promotions count the promoted piece.
    fn order_score(&self, m: Move) -> i32 {
        let mut score = 0;

        if m.is_capture() {
            let victim = if m.is_en_passant() {
                Piece::Pawn
            } else {
                self.board.piece_on(m.to()).unwrap_or(Piece::Pawn)
            };
            let attacker = self.board.piece_on(m.from()).unwrap_or(Piece::Pawn);
            score += 10_000 + victim.value() * 10 - attacker.value() / 10;
        }

        if let Some(promo) = m.promotion() {
            score += promo.value();
        }

        score
    }
}
