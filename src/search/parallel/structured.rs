//! Structured-parallelism scheduling on a rayon thread pool.
//!
//! The producer runs inside a rayon scope and spawns one scoped task per
//! partial board instead of queueing it. Each task reports its count over an
//! unbounded channel; the reports are folded into per-thread statistics
//! after the scope (and so every task) has finished.

use crate::board::BoardState;
use crate::error::Result;
use crate::search::config::SearchConfig;
use crate::search::generator::{generate_tasks, Task};
use crate::search::parallel::coordinator::ScheduleOutcome;
use crate::search::parallel::worker::run_task;
use crate::search::result::WorkerStatistics;
use crossbeam_channel::unbounded;
use tracing::debug;

/// Result of one spawned task, tagged with the pool thread that ran it.
#[derive(Debug)]
struct TaskReport {
    thread_index: usize,
    stats: WorkerStatistics,
}

pub(crate) fn run_structured_scheduler(
    config: &SearchConfig,
    split_depth: usize,
) -> Result<ScheduleOutcome> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|index| format!("queens-worker-{}", index))
        .build()?;

    let (report_tx, report_rx) = unbounded::<TaskReport>();
    let collect = config.collect_solutions;

    let tasks_generated = pool.scope(|scope| {
        let mut board = BoardState::new(config.board_size);
        generate_tasks(&mut board, split_depth, &mut |task: Task| {
            let report_tx = report_tx.clone();
            scope.spawn(move |_| {
                let thread_index = rayon::current_thread_index().unwrap_or(0);
                let mut stats = WorkerStatistics::new(thread_index);
                run_task(task, collect, &mut stats);
                // The receiver outlives the scope, so this cannot fail
                let _ = report_tx.send(TaskReport {
                    thread_index,
                    stats,
                });
            });
        })
    });
    drop(report_tx);
    debug!(tasks = tasks_generated, split_depth, "all scoped tasks finished");

    let mut workers: Vec<WorkerStatistics> =
        (0..config.workers).map(WorkerStatistics::new).collect();
    for report in report_rx.iter() {
        let worker = &mut workers[report.thread_index.min(config.workers - 1)];
        worker.solutions += report.stats.solutions;
        worker.tasks_completed += report.stats.tasks_completed;
        worker.busy_time += report.stats.busy_time;
        worker.boards.extend(report.stats.boards);
    }

    Ok(ScheduleOutcome {
        tasks_generated,
        workers,
        queue_stats: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::Scheduler;
    use crate::search::parallel::run_parallel_search;

    #[test]
    fn test_structured_scheduler_counts() {
        for (n, expected) in [(1, 1), (4, 2), (6, 4), (8, 92), (10, 724)] {
            for workers in [1, 4] {
                let config = SearchConfig::new(n, workers).with_scheduler(Scheduler::Structured);
                let result = run_parallel_search(&config).unwrap();
                assert_eq!(result.solutions, expected, "n = {}, workers = {}", n, workers);
                assert_eq!(result.workers.len(), workers);
                assert_eq!(result.tasks_completed(), result.tasks_generated);
            }
        }
    }

    #[test]
    fn test_structured_collects_solutions() {
        let config = SearchConfig::new(6, 2)
            .with_scheduler(Scheduler::Structured)
            .with_collect_solutions(true);
        let result = run_parallel_search(&config).unwrap();
        assert_eq!(result.solution_boards().len(), 4);
    }
}
