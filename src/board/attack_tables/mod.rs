//! Attack tables for move generation.
//!
//! Leaper attacks (knight, king, pawn captures) come from precomputed
//! tables. Sliding attacks are computed on demand by walking rays over
//! the current occupancy; rank/file arithmetic makes board-edge
//! wraparound impossible by construction.

mod tables;

pub(crate) use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

const ROOK_DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Attack set of a sliding piece on `square` given `occupied`.
/// `diagonal` selects bishop rays; otherwise rook rays.
/// Blocker squares are included in the result.
pub(crate) fn slider_attacks(square: usize, occupied: u64, diagonal: bool) -> u64 {
    let dirs = if diagonal { BISHOP_DIRS } else { ROOK_DIRS };
    let rank = (square / 8) as isize;
    let file = (square % 8) as isize;
    let mut attacks = 0u64;

    for (dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let idx = (r as usize) * 8 + (f as usize);
            attacks |= 1u64 << idx;
            if occupied & (1u64 << idx) != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }

    attacks
}
