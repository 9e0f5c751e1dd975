//! Engine controller implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::debug;
use parking_lot::Mutex;

use crate::board::search::{search, SearchResult, SearchSettings};
use crate::board::Board;

/// Search thread stack size (32 MB). The search recurses one stack
/// frame per ply, so the default thread stack is not enough in debug
/// builds.
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Active search job state
pub struct SearchJob {
    /// Stop flag for the search
    pub stop: Arc<AtomicBool>,
    /// Handle to the search thread
    handle: JoinHandle<()>,
}

impl SearchJob {
    /// Stop the search and wait for the thread to finish
    pub fn stop_and_wait(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
    }

    /// Signal stop without waiting
    pub fn signal_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Engine controller managing search and game state
pub struct EngineController {
    /// Current board position
    board: Board,
    /// Active search job (if any)
    current_job: Option<SearchJob>,
    /// Result of the most recently completed search
    last_result: Arc<Mutex<Option<SearchResult>>>,
}

impl Default for EngineController {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineController {
    /// Create a new engine controller at the starting position
    #[must_use]
    pub fn new() -> Self {
        EngineController {
            board: Board::new(),
            current_job: None,
            last_result: Arc::new(Mutex::new(None)),
        }
    }

    /// Get a reference to the current board
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Set the board position
    pub fn set_board(&mut self, board: Board) {
        self.stop_search();
        self.board = board;
    }

    /// Reset the board to starting position
    pub fn new_game(&mut self) {
        self.stop_search();
        self.board = Board::new();
        *self.last_result.lock() = None;
    }

    /// Stop any active search
    pub fn stop_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.stop_and_wait();
        }
    }

    /// Signal stop to active search (non-blocking)
    pub fn signal_stop(&mut self) {
        if let Some(job) = &self.current_job {
            job.signal_stop();
        }
    }

    /// Check if there's an active search
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_job.is_some()
    }

    /// Result of the most recently completed search, if any
    #[must_use]
    pub fn last_result(&self) -> Option<SearchResult> {
        self.last_result.lock().clone()
    }

    /// Start a search with the given settings.
    ///
    /// The `on_complete` callback is called on the search thread when
    /// the search finishes with the result. The search runs on a copy
    /// of the current board, so the controller's position is untouched.
    pub fn start_search<F>(&mut self, settings: SearchSettings, on_complete: F)
    where
        F: FnOnce(SearchResult) + Send + 'static,
    {
        self.stop_search();

        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);
        let mut search_board = self.board.clone();
        let last_result = Arc::clone(&self.last_result);

        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let result = search(&mut search_board, &settings, &stop_clone);
                debug!(
                    "search finished: depth {} nodes {} in {:?}",
                    result.depth, result.nodes, result.elapsed
                );
                *last_result.lock() = Some(result.clone());
                on_complete(result);
            })
            .expect("failed to spawn search thread");

        self.current_job = Some(SearchJob { stop, handle });
    }
}
