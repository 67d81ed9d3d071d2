//! Parallel execution of the N-Queens search.
//!
//! This module splits the search tree between one producer and a fixed pool
//! of workers, then reduces the workers' private counts once they have all
//! exited.
//!
//! # Architecture
//!
//! The parallel search system consists of:
//! - A **coordinator** that validates the configuration, picks the split
//!   depth, runs the chosen scheduler and sums the worker reports
//! - A **producer** (the calling thread) that fills in the first
//!   `split_depth` rows and hands off each partial board as a task
//! - **Workers** that complete tasks with the backtracking engine, each
//!   keeping its own count
//! - Three interchangeable **schedulers** for the hand-off: the bounded
//!   monitor queue, a bounded crossbeam channel, and a rayon scope
//!
//! # Example
//!
//! ```
//! use nqueens_bag::search::config::{Scheduler, SearchConfig};
//! use nqueens_bag::search::parallel::run_parallel_search;
//!
//! let config = SearchConfig::new(8, 4)
//!     .with_queue_capacity(16)
//!     .with_scheduler(Scheduler::Queue);
//!
//! let result = run_parallel_search(&config).unwrap();
//! assert_eq!(result.solutions, 92);
//! ```

pub mod channel;
pub mod coordinator;
pub mod structured;
pub mod worker;

pub use coordinator::{run_parallel_search, run_search};
pub use worker::{run_worker, TaskSource, WorkerPool};
