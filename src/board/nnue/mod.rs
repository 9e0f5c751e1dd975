//! NNUE (efficiently updatable neural network) evaluation.
//!
//! Integer-only inference with incremental accumulator updates.
//! Architecture: (768 -> 128) x 2 perspectives -> 1, CReLU activation.

pub mod network;

pub use network::{NnueAccumulator, NnueNetwork, HIDDEN_SIZE, INPUT_SIZE};

pub(crate) use network::{feature_index, NETWORK};

/// Weight quantization factor for feature weights
pub const QA: i32 = 255;

/// Output weight quantization factor
pub const QB: i32 = 64;

/// Evaluation scale factor (centipawns)
pub const SCALE: i32 = 400;
