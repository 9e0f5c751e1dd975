pub mod board;
pub mod engine;
pub mod uci;

mod zobrist;

pub use board::search::{search, SearchResult, SearchSettings, SearchStrategy};
pub use board::{Board, Color, GameOutcome, Move, Piece, Square};
pub use engine::EngineController;
