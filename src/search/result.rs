//! Search result types and statistics

use crate::search::config::Scheduler;
use crate::search::queue::QueueStats;
use std::time::Duration;

/// Report returned by one worker after it exits.
#[derive(Debug, Clone, Default)]
pub struct WorkerStatistics {
    pub worker_id: usize,
    /// Solutions found in this worker's tasks
    pub solutions: u64,
    /// Tasks this worker took from the queue
    pub tasks_completed: u64,
    /// Time spent inside the search engine
    pub busy_time: Duration,
    /// Solution boards as column-per-row lists (empty unless collected)
    pub boards: Vec<Vec<usize>>,
}

impl WorkerStatistics {
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Default::default()
        }
    }
}

/// Result of a parallel search
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub board_size: usize,
    /// Total solutions across all workers
    pub solutions: u64,
    pub split_depth: usize,
    /// Tasks emitted by the producer
    pub tasks_generated: u64,
    pub scheduler: Scheduler,
    /// Wall-clock time from worker start to final join
    pub elapsed_time: Duration,
    /// Per-worker reports, ordered by worker id
    pub workers: Vec<WorkerStatistics>,
    /// Queue counters (only for [`Scheduler::Queue`])
    pub queue_stats: Option<QueueStats>,
}

impl SearchResult {
    /// Tasks consumed across all workers.
    pub fn tasks_completed(&self) -> u64 {
        self.workers.iter().map(|w| w.tasks_completed).sum()
    }

    /// All collected solution boards, sorted.
    pub fn solution_boards(&self) -> Vec<Vec<usize>> {
        let mut boards: Vec<Vec<usize>> = self
            .workers
            .iter()
            .flat_map(|w| w.boards.iter().cloned())
            .collect();
        boards.sort();
        boards
    }

    /// Ratio of the busiest worker's task count to the mean (1.0 = even).
    pub fn load_imbalance(&self) -> f64 {
        let total = self.tasks_completed();
        if total == 0 || self.workers.is_empty() {
            return 1.0;
        }
        let mean = total as f64 / self.workers.len() as f64;
        let max = self
            .workers
            .iter()
            .map(|w| w.tasks_completed)
            .max()
            .unwrap_or(0);
        max as f64 / mean
    }
}
