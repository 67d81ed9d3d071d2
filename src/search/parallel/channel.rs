//! Channel-based scheduling over a bounded crossbeam channel.
//!
//! Same producer/worker protocol as the queue scheduler, but the hand-off is
//! a `crossbeam_channel::bounded` channel: `send` blocks while the buffer is
//! full, `recv` blocks while it is empty, and dropping the only sender plays
//! the role of marking production complete.

use crate::board::BoardState;
use crate::error::Result;
use crate::search::config::SearchConfig;
use crate::search::generator::{generate_tasks, Task};
use crate::search::parallel::coordinator::ScheduleOutcome;
use crate::search::parallel::worker::WorkerPool;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, warn};

/// Push every task into `tx`, then close the channel by dropping it.
///
/// Returns the number of tasks generated. Sends can only fail once every
/// worker is gone, in which case the join reports why.
fn produce_into_channel(board_size: usize, split_depth: usize, tx: Sender<Task>) -> u64 {
    let mut undelivered = 0u64;
    let emitted = generate_tasks(
        &mut BoardState::new(board_size),
        split_depth,
        &mut |task: Task| {
            if tx.send(task).is_err() {
                undelivered += 1;
            }
        },
    );
    drop(tx);

    if undelivered > 0 {
        warn!(undelivered, "tasks could not be delivered to any worker");
    }
    debug!(tasks = emitted, split_depth, "producer finished");
    emitted
}

pub(crate) fn run_channel_scheduler(
    config: &SearchConfig,
    split_depth: usize,
) -> Result<ScheduleOutcome> {
    let (tx, rx): (Sender<Task>, Receiver<Task>) = bounded(config.queue_capacity);
    let rx = Arc::new(rx);

    let mut sender = Some(tx);
    let pool = WorkerPool::start(config.workers, config.collect_solutions, &rx, || {
        sender.take();
    })?;
    debug!(workers = pool.len(), capacity = config.queue_capacity, "worker pool started");

    let tasks_generated = match sender.take() {
        Some(tx) => produce_into_channel(config.board_size, split_depth, tx),
        None => 0,
    };
    let workers = pool.join()?;

    Ok(ScheduleOutcome {
        tasks_generated,
        workers,
        queue_stats: None,
    })
}
