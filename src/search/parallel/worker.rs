//! Worker threads that finish partial boards.

use crate::board::BoardState;
use crate::error::{QueensError, Result};
use crate::search::engine::{solve, solve_with};
use crate::search::generator::Task;
use crate::search::queue::BoundedQueue;
use crate::search::result::WorkerStatistics;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error, trace};

/// Where a worker takes its tasks from.
///
/// `next_task` blocks until a task is available and returns `None` once the
/// source is drained and no more tasks will ever arrive.
pub trait TaskSource: Send + Sync {
    fn next_task(&self) -> Option<Task>;
}

impl TaskSource for BoundedQueue<Task> {
    fn next_task(&self) -> Option<Task> {
        self.pop()
    }
}

impl TaskSource for Receiver<Task> {
    fn next_task(&self) -> Option<Task> {
        // Err means every sender is gone and the buffer is empty
        self.recv().ok()
    }
}

/// Complete one task, folding its result into `stats`.
pub(crate) fn run_task(task: Task, collect_solutions: bool, stats: &mut WorkerStatistics) {
    let started = Instant::now();
    let mut board = task.into_board();
    let start_row = board.placed_row();

    let found = if collect_solutions {
        let boards = &mut stats.boards;
        solve_with(&mut board, &mut |b: &BoardState| {
            boards.push(b.queens().to_vec())
        })
    } else {
        solve(&mut board)
    };

    trace!(
        worker_id = stats.worker_id,
        start_row,
        solutions = found,
        "task finished"
    );
    stats.solutions += found;
    stats.tasks_completed += 1;
    stats.busy_time += started.elapsed();
}

/// Worker loop: take tasks until the source closes, then report.
pub fn run_worker<S>(worker_id: usize, source: &S, collect_solutions: bool) -> WorkerStatistics
where
    S: TaskSource + ?Sized,
{
    debug!(worker_id, "worker started");
    let mut stats = WorkerStatistics::new(worker_id);

    while let Some(task) = source.next_task() {
        run_task(task, collect_solutions, &mut stats);
    }

    debug!(
        worker_id,
        tasks = stats.tasks_completed,
        solutions = stats.solutions,
        "worker exiting"
    );
    stats
}

/// A fixed set of worker threads sharing one task source.
pub struct WorkerPool {
    handles: Vec<(usize, JoinHandle<WorkerStatistics>)>,
}

impl WorkerPool {
    /// Spawn `count` workers on `source`.
    ///
    /// If a thread cannot be spawned, `close_source` is called so the
    /// workers already running see the source close, they are joined, and
    /// the spawn error is returned.
    pub fn start<S, F>(
        count: usize,
        collect_solutions: bool,
        source: &Arc<S>,
        close_source: F,
    ) -> Result<Self>
    where
        S: TaskSource + 'static,
        F: FnOnce(),
    {
        let mut pool = Self {
            handles: Vec::with_capacity(count),
        };

        for worker_id in 0..count {
            let source = Arc::clone(source);
            let spawned = thread::Builder::new()
                .name(format!("queens-worker-{}", worker_id))
                .spawn(move || run_worker(worker_id, source.as_ref(), collect_solutions));

            match spawned {
                Ok(handle) => pool.handles.push((worker_id, handle)),
                Err(err) => {
                    error!(worker_id, error = %err, "failed to spawn worker");
                    close_source();
                    let _ = pool.join();
                    return Err(QueensError::ThreadSpawn(err));
                }
            }
        }

        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every worker and collect their reports in worker-id order.
    ///
    /// All workers are joined even if one panicked; the first panicking
    /// worker is reported.
    pub fn join(self) -> Result<Vec<WorkerStatistics>> {
        let mut reports = Vec::with_capacity(self.handles.len());
        let mut panicked = None;

        for (worker_id, handle) in self.handles {
            match handle.join() {
                Ok(stats) => reports.push(stats),
                Err(_) => {
                    error!(worker_id, "worker panicked");
                    panicked.get_or_insert(worker_id);
                }
            }
        }

        match panicked {
            Some(worker_id) => Err(QueensError::WorkerPanicked { worker_id }),
            None => Ok(reports),
        }
    }
}
