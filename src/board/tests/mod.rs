//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generation node counts against known values
//! - `make_unmake.rs` - Make/unmake reversibility and hash consistency
//! - `draw.rs` - Terminal and draw detection
//! - `eval.rs` - NNUE evaluation behavior
//! - `proptest.rs` - Property-based tests

mod make_unmake;
mod perft;
