//! Parallel search coordinator: producer in the calling thread, workers in a
//! fixed pool, counts reduced after join.

use crate::error::Result;
use crate::search::config::{Scheduler, SearchConfig};
use crate::search::generator::{produce, Task};
use crate::search::parallel::channel::run_channel_scheduler;
use crate::search::parallel::structured::run_structured_scheduler;
use crate::search::parallel::worker::WorkerPool;
use crate::search::queue::{BoundedQueue, QueueStats};
use crate::search::result::{SearchResult, WorkerStatistics};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span};

/// What a scheduler hands back to the coordinator.
#[derive(Debug)]
pub(crate) struct ScheduleOutcome {
    pub tasks_generated: u64,
    pub workers: Vec<WorkerStatistics>,
    pub queue_stats: Option<QueueStats>,
}

/// Count the solutions for a `board_size`x`board_size` board on
/// `worker_count` threads, using the default queue scheduler and the
/// split-depth heuristic.
pub fn run_search(board_size: usize, worker_count: usize) -> Result<u64> {
    let config = SearchConfig::new(board_size, worker_count);
    Ok(run_parallel_search(&config)?.solutions)
}

/// Run a parallel search with the given configuration.
///
/// The configuration is validated before any thread is started.
pub fn run_parallel_search(config: &SearchConfig) -> Result<SearchResult> {
    config.validate()?;
    let split_depth = config.resolved_split_depth();

    let span = info_span!(
        "search",
        n = config.board_size,
        workers = config.workers,
        split_depth,
        scheduler = %config.scheduler
    );
    let _guard = span.enter();

    let start_time = Instant::now();
    let outcome = match config.scheduler {
        Scheduler::Queue => run_queue_scheduler(config, split_depth)?,
        Scheduler::Channel => run_channel_scheduler(config, split_depth)?,
        Scheduler::Structured => run_structured_scheduler(config, split_depth)?,
    };
    let elapsed_time = start_time.elapsed();

    // Every worker has been joined; the reduction needs no synchronisation
    let solutions = outcome.workers.iter().map(|w| w.solutions).sum();

    info!(
        solutions,
        tasks = outcome.tasks_generated,
        elapsed_ms = elapsed_time.as_secs_f64() * 1000.0,
        "search finished"
    );

    Ok(SearchResult {
        board_size: config.board_size,
        solutions,
        split_depth,
        tasks_generated: outcome.tasks_generated,
        scheduler: config.scheduler,
        elapsed_time,
        workers: outcome.workers,
        queue_stats: outcome.queue_stats,
    })
}

/// Explicit bounded-queue scheduling.
///
/// Workers start first and block on the empty queue; the producer then runs
/// here, blocking whenever the queue is full, and marks the queue complete
/// after its last push so the workers drain it and exit.
fn run_queue_scheduler(config: &SearchConfig, split_depth: usize) -> Result<ScheduleOutcome> {
    let queue: Arc<BoundedQueue<Task>> = Arc::new(BoundedQueue::new(config.queue_capacity));

    let pool = WorkerPool::start(config.workers, config.collect_solutions, &queue, || {
        queue.mark_complete();
    })?;
    debug!(workers = pool.len(), capacity = queue.capacity(), "worker pool started");

    let tasks_generated = produce(config.board_size, split_depth, &queue);
    let workers = pool.join()?;

    let queue_stats = queue.stats();
    debug_assert_eq!(queue_stats.pushed, tasks_generated);
    debug_assert_eq!(queue_stats.popped, tasks_generated);
    debug!(
        producer_waits = queue_stats.producer_waits,
        consumer_waits = queue_stats.consumer_waits,
        "queue drained"
    );

    Ok(ScheduleOutcome {
        tasks_generated,
        workers,
        queue_stats: Some(queue_stats),
    })
}
