//! Error types for the N-Queens search.

use thiserror::Error;

/// Errors surfaced by the search before or while running worker threads.
#[derive(Error, Debug)]
pub enum QueensError {
    #[error("Board size {size} is out of range (supported: 1..={max})")]
    InvalidBoardSize { size: usize, max: usize },

    #[error("Worker count must be at least 1 (got {0})")]
    InvalidWorkerCount(usize),

    #[error("Split depth {depth} is out of range for a {size}x{size} board (expected 1..={size})")]
    InvalidSplitDepth { depth: usize, size: usize },

    #[error("Queue capacity must be at least 1 (got {0})")]
    InvalidQueueCapacity(usize),

    #[error("Failed to spawn worker thread: {0}")]
    ThreadSpawn(#[from] std::io::Error),

    #[error("Failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    #[error("Run count must be at least 1 (got {0})")]
    InvalidRunCount(usize),

    #[error("Solution count mismatch with {workers} worker(s): expected {expected}, got {actual}")]
    CountMismatch {
        workers: usize,
        expected: u64,
        actual: u64,
    },
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, QueensError>;
