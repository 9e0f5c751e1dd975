//! NNUE network structure and evaluation.
//!
//! Dual perspective accumulators (white/black view) with incremental
//! add/sub updates, a clipped linear (CReLU) forward pass, and a
//! little-endian byte-stream loader for externally trained weights.

use once_cell::sync::Lazy;
use rand::prelude::*;

use super::{QA, QB, SCALE};

/// Input feature size: 64 squares x 6 piece types x 2 colors
pub const INPUT_SIZE: usize = 768;

/// Hidden layer size (must match trained network)
pub const HIDDEN_SIZE: usize = 128;

/// NNUE accumulator storing hidden layer pre-activations for both perspectives
#[derive(Clone)]
pub struct NnueAccumulator {
    /// White's perspective accumulator
    pub white: [i16; HIDDEN_SIZE],
    /// Black's perspective accumulator
    pub black: [i16; HIDDEN_SIZE],
}

impl Default for NnueAccumulator {
    fn default() -> Self {
        Self {
            white: [0; HIDDEN_SIZE],
            black: [0; HIDDEN_SIZE],
        }
    }
}

#[inline]
fn add_weights(acc: &mut [i16; HIDDEN_SIZE], weights: &[i16; HIDDEN_SIZE]) {
    for (a, w) in acc.iter_mut().zip(weights.iter()) {
        *a += *w;
    }
}

#[inline]
fn sub_weights(acc: &mut [i16; HIDDEN_SIZE], weights: &[i16; HIDDEN_SIZE]) {
    for (a, w) in acc.iter_mut().zip(weights.iter()) {
        *a -= *w;
    }
}

impl NnueAccumulator {
    /// Create a new accumulator initialized with biases (empty board)
    #[must_use]
    pub fn new(biases: &[i16; HIDDEN_SIZE]) -> Self {
        Self {
            white: *biases,
            black: *biases,
        }
    }

    /// Refresh accumulator from scratch given active features
    pub fn refresh(
        &mut self,
        white_features: &[usize],
        black_features: &[usize],
        network: &NnueNetwork,
    ) {
        self.white = network.feature_bias;
        self.black = network.feature_bias;

        for &feat in white_features {
            add_weights(&mut self.white, &network.feature_weights[feat]);
        }
        for &feat in black_features {
            add_weights(&mut self.black, &network.feature_weights[feat]);
        }
    }

    /// Add a feature (piece placed on square)
    #[inline]
    pub fn add_feature(&mut self, white_feat: usize, black_feat: usize, network: &NnueNetwork) {
        add_weights(&mut self.white, &network.feature_weights[white_feat]);
        add_weights(&mut self.black, &network.feature_weights[black_feat]);
    }

    /// Remove a feature (piece removed from square)
    #[inline]
    pub fn sub_feature(&mut self, white_feat: usize, black_feat: usize, network: &NnueNetwork) {
        sub_weights(&mut self.white, &network.feature_weights[white_feat]);
        sub_weights(&mut self.black, &network.feature_weights[black_feat]);
    }
}

/// NNUE network weights
pub struct NnueNetwork {
    /// Feature transformer weights `[INPUT_SIZE][HIDDEN_SIZE]`
    pub feature_weights: Box<[[i16; HIDDEN_SIZE]; INPUT_SIZE]>,
    /// Feature transformer biases `[HIDDEN_SIZE]`
    pub feature_bias: [i16; HIDDEN_SIZE],
    /// Output weights for white perspective `[HIDDEN_SIZE]`
    pub output_weights_white: [i16; HIDDEN_SIZE],
    /// Output weights for black perspective `[HIDDEN_SIZE]`
    pub output_weights_black: [i16; HIDDEN_SIZE],
    /// Output bias
    pub output_bias: i16,
}

/// CReLU activation and dot product, accumulated in i64
#[inline]
fn crelu_dot(acc: &[i16; HIDDEN_SIZE], weights: &[i16; HIDDEN_SIZE]) -> i64 {
    let mut sum = 0i64;
    for (a, w) in acc.iter().zip(weights.iter()) {
        let activated = i64::from(*a).clamp(0, i64::from(QA));
        sum += activated * i64::from(*w);
    }
    sum
}

impl NnueNetwork {
    /// Load network from byte slice (little-endian i16 stream in the order
    /// feature weights, feature bias, output weights white, output weights
    /// black, output bias).
    pub fn from_bytes(data: &[u8]) -> std::io::Result<Self> {
        let mut reader = std::io::Cursor::new(data);
        Self::from_reader(&mut reader)
    }

    /// Load network from any reader
    pub fn from_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        fn read_i16<R: std::io::Read>(reader: &mut R) -> std::io::Result<i16> {
            let mut buf = [0u8; 2];
            reader.read_exact(&mut buf)?;
            Ok(i16::from_le_bytes(buf))
        }

        let mut feature_weights = Box::new([[0i16; HIDDEN_SIZE]; INPUT_SIZE]);
        for row in feature_weights.iter_mut() {
            for elem in row.iter_mut() {
                *elem = read_i16(reader)?;
            }
        }

        let mut feature_bias = [0i16; HIDDEN_SIZE];
        for elem in &mut feature_bias {
            *elem = read_i16(reader)?;
        }

        let mut output_weights_white = [0i16; HIDDEN_SIZE];
        for elem in &mut output_weights_white {
            *elem = read_i16(reader)?;
        }

        let mut output_weights_black = [0i16; HIDDEN_SIZE];
        for elem in &mut output_weights_black {
            *elem = read_i16(reader)?;
        }

        let output_bias = read_i16(reader)?;

        Ok(Self {
            feature_weights,
            feature_bias,
            output_weights_white,
            output_weights_black,
            output_bias,
        })
    }

    /// Deterministic default network generated from a fixed seed, so
    /// evaluation is identical across runs and platforms.
    #[must_use]
    pub(crate) fn generated_default() -> Self {
        let mut rng = StdRng::seed_from_u64(0x6E6E_7565_u64);

        let mut feature_weights = Box::new([[0i16; HIDDEN_SIZE]; INPUT_SIZE]);
        for row in feature_weights.iter_mut() {
            for elem in row.iter_mut() {
                *elem = rng.gen_range(-24i16..=24);
            }
        }

        let mut feature_bias = [0i16; HIDDEN_SIZE];
        for elem in &mut feature_bias {
            *elem = rng.gen_range(-16i16..=16);
        }

        let mut output_weights_white = [0i16; HIDDEN_SIZE];
        for elem in &mut output_weights_white {
            *elem = rng.gen_range(-48i16..=48);
        }

        let mut output_weights_black = [0i16; HIDDEN_SIZE];
        for elem in &mut output_weights_black {
            *elem = rng.gen_range(-48i16..=48);
        }

        let output_bias = rng.gen_range(-32i16..=32);

        Self {
            feature_weights,
            feature_bias,
            output_weights_white,
            output_weights_black,
            output_bias,
        }
    }

    /// Evaluate position given accumulator and side to move.
    /// Returns evaluation in centipawns from the side-to-move perspective.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, acc: &NnueAccumulator, white_to_move: bool) -> i32 {
        let (us_acc, them_acc, us_weights, them_weights) = if white_to_move {
            (
                &acc.white,
                &acc.black,
                &self.output_weights_white,
                &self.output_weights_black,
            )
        } else {
            (
                &acc.black,
                &acc.white,
                &self.output_weights_black,
                &self.output_weights_white,
            )
        };

        let us_output = crelu_dot(us_acc, us_weights);
        let them_output = crelu_dot(them_acc, them_weights);

        let output = us_output + them_output + i64::from(self.output_bias);

        (output * i64::from(SCALE) / (i64::from(QA) * i64::from(QB))) as i32
    }
}

/// Compute feature index for a piece at a square from a perspective.
/// Perspective 1 (black) mirrors the board vertically and flips colors.
#[inline]
#[must_use]
pub(crate) fn feature_index(
    piece_type: usize,
    piece_color: usize,
    square: usize,
    perspective: usize,
) -> usize {
    let (oriented_sq, oriented_color) = if perspective == 1 {
        (square ^ 56, 1 - piece_color)
    } else {
        (square, piece_color)
    };
    oriented_color * 384 + piece_type * 64 + oriented_sq
}

/// Process-wide default network. Immutable weight table, shared by all boards.
pub(crate) static NETWORK: Lazy<NnueNetwork> = Lazy::new(NnueNetwork::generated_default);
