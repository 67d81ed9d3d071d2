//! N-Queens search: sequential engine and parallel front ends
//!
//! - `engine`: backtracking solver over a [`BoardState`](crate::board::BoardState)
//! - `generator`: producer that cuts the search tree into tasks at a split depth
//! - `queue`: bounded blocking queue carrying tasks to workers
//! - `parallel`: worker pool, schedulers and the coordinator

pub mod config;
pub mod engine;
pub mod generator;
pub mod parallel;
pub mod queue;
pub mod result;

pub use config::{Scheduler, SearchConfig};
pub use engine::{count_solutions, solve, solve_with};
pub use generator::{choose_split_depth, count_tasks, generate_tasks, produce, Task};
pub use parallel::{run_parallel_search, run_search};
pub use queue::{BoundedQueue, QueueStats};
pub use result::{SearchResult, WorkerStatistics};
