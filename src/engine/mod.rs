//! Engine controller: owns the game position and runs searches on a
//! dedicated worker thread.

mod controller;

pub use controller::{EngineController, SearchJob};
