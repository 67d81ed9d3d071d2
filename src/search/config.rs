//! Configuration types for the parallel search

use crate::board::MAX_BOARD_SIZE;
use crate::error::{QueensError, Result};
use crate::search::generator::choose_split_depth;

/// Default number of tasks the queue buffers before the producer blocks.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// How tasks are handed from the producer to the workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheduler {
    /// Bounded monitor queue with a production-complete flag
    #[default]
    Queue,
    /// Bounded crossbeam channel, closed by dropping the sender
    Channel,
    /// Rayon scope with one spawned task per partial board
    Structured,
}

impl std::fmt::Display for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheduler::Queue => write!(f, "queue"),
            Scheduler::Channel => write!(f, "channel"),
            Scheduler::Structured => write!(f, "structured"),
        }
    }
}

impl std::str::FromStr for Scheduler {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queue" | "monitor" => Ok(Scheduler::Queue),
            "channel" | "crossbeam" => Ok(Scheduler::Channel),
            "structured" | "rayon" | "tasks" => Ok(Scheduler::Structured),
            _ => Err(format!(
                "Unknown scheduler: '{}'. Valid options: queue, channel, structured",
                s
            )),
        }
    }
}

/// Main search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Board side length (number of queens)
    pub board_size: usize,
    /// Number of worker threads
    pub workers: usize,
    /// Rows the producer fills in before handing off (None = heuristic)
    pub split_depth: Option<usize>,
    /// Maximum number of tasks buffered between producer and workers
    pub queue_capacity: usize,
    /// Task hand-off strategy
    pub scheduler: Scheduler,
    /// Keep every solution board, not just the count
    pub collect_solutions: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            workers: num_cpus::get(),
            split_depth: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            scheduler: Scheduler::Queue,
            collect_solutions: false,
        }
    }
}

impl SearchConfig {
    /// Create a config for the given board size and worker count.
    pub fn new(board_size: usize, workers: usize) -> Self {
        Self::default()
            .with_board_size(board_size)
            .with_workers(workers)
    }

    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_split_depth(mut self, depth: usize) -> Self {
        self.split_depth = Some(depth);
        self
    }

    pub fn with_split_depth_option(mut self, depth: Option<usize>) -> Self {
        self.split_depth = depth;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_collect_solutions(mut self, collect: bool) -> Self {
        self.collect_solutions = collect;
        self
    }

    /// The split depth the search will use: the override if set, otherwise
    /// [`choose_split_depth`].
    pub fn resolved_split_depth(&self) -> usize {
        self.split_depth
            .unwrap_or_else(|| choose_split_depth(self.board_size))
    }

    /// Reject configurations the search cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(QueensError::InvalidBoardSize {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.workers == 0 {
            return Err(QueensError::InvalidWorkerCount(self.workers));
        }
        let depth = self.resolved_split_depth();
        if depth == 0 || depth > self.board_size {
            return Err(QueensError::InvalidSplitDepth {
                depth,
                size: self.board_size,
            });
        }
        if self.queue_capacity == 0 {
            return Err(QueensError::InvalidQueueCapacity(self.queue_capacity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_from_str() {
        assert_eq!("queue".parse::<Scheduler>().unwrap(), Scheduler::Queue);
        assert_eq!("Channel".parse::<Scheduler>().unwrap(), Scheduler::Channel);
        assert_eq!(
            "structured".parse::<Scheduler>().unwrap(),
            Scheduler::Structured
        );
        assert_eq!("rayon".parse::<Scheduler>().unwrap(), Scheduler::Structured);
        assert!("stealing".parse::<Scheduler>().is_err());
    }

    #[test]
    fn test_scheduler_display_round_trips() {
        for scheduler in [Scheduler::Queue, Scheduler::Channel, Scheduler::Structured] {
            assert_eq!(scheduler.to_string().parse::<Scheduler>().unwrap(), scheduler);
        }
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.board_size, 8);
        assert!(config.workers >= 1);
        assert!(config.split_depth.is_none());
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.scheduler, Scheduler::Queue);
        assert!(!config.collect_solutions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::new(12, 3)
            .with_split_depth(2)
            .with_queue_capacity(16)
            .with_scheduler(Scheduler::Channel)
            .with_collect_solutions(true);

        assert_eq!(config.board_size, 12);
        assert_eq!(config.workers, 3);
        assert_eq!(config.resolved_split_depth(), 2);
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.scheduler, Scheduler::Channel);
        assert!(config.collect_solutions);
    }

    #[test]
    fn test_resolved_split_depth_uses_heuristic() {
        let config = SearchConfig::new(13, 1);
        assert_eq!(config.resolved_split_depth(), 3);
        let config = config.with_split_depth_option(Some(5));
        assert_eq!(config.resolved_split_depth(), 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            SearchConfig::new(0, 2).validate(),
            Err(QueensError::InvalidBoardSize { size: 0, .. })
        ));
        assert!(matches!(
            SearchConfig::new(MAX_BOARD_SIZE + 1, 2).validate(),
            Err(QueensError::InvalidBoardSize { .. })
        ));
        assert!(matches!(
            SearchConfig::new(8, 0).validate(),
            Err(QueensError::InvalidWorkerCount(0))
        ));
        assert!(matches!(
            SearchConfig::new(8, 2).with_split_depth(0).validate(),
            Err(QueensError::InvalidSplitDepth { depth: 0, size: 8 })
        ));
        assert!(matches!(
            SearchConfig::new(8, 2).with_split_depth(9).validate(),
            Err(QueensError::InvalidSplitDepth { depth: 9, size: 8 })
        ));
        assert!(matches!(
            SearchConfig::new(8, 2).with_queue_capacity(0).validate(),
            Err(QueensError::InvalidQueueCapacity(0))
        ));
    }
}
