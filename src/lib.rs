//! Parallel N-Queens solver.
//!
//! A producer fills in the first rows of the board down to a split depth and
//! hands each partial board to a fixed pool of worker threads through a
//! bounded blocking queue. Each worker finishes its boards with a
//! backtracking search and keeps a private count; the counts are summed
//! after every worker has been joined.
//!
//! ```
//! assert_eq!(nqueens_bag::run_search(8, 4).unwrap(), 92);
//! assert_eq!(nqueens_bag::choose_split_depth(12), 3);
//! ```

pub mod bench;
pub mod board;
pub mod error;
pub mod logging;
pub mod search;

pub use board::{BoardState, MAX_BOARD_SIZE};
pub use error::{QueensError, Result};
pub use search::{choose_split_depth, run_parallel_search, run_search};
