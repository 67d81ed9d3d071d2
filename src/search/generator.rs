//! Task generation for the parallel search
//!
//! The producer walks the top of the search tree exactly like the engine,
//! but stops at `split_depth`: every consistent placement of rows
//! `0..split_depth` becomes one [`Task`]. Tasks fix distinct prefixes, so
//! their subtrees are disjoint and their counts simply add up.

use crate::board::BoardState;
use crate::search::queue::BoundedQueue;
use tracing::{debug, trace};

/// A partial board handed from the producer to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    board: BoardState,
}

impl Task {
    fn snapshot(board: &BoardState) -> Self {
        Self {
            board: board.clone(),
        }
    }

    /// The partial board, with rows `0..split_depth` committed.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Row the worker starts searching from.
    pub fn start_row(&self) -> usize {
        self.board.placed_row()
    }

    pub fn into_board(self) -> BoardState {
        self.board
    }
}

/// Pick how many rows the producer fills in before handing off.
///
/// Aims for tens to low thousands of tasks: enough to balance uneven
/// subtrees across workers, few enough that copying and queueing stay
/// negligible next to the search itself.
pub fn choose_split_depth(board_size: usize) -> usize {
    let depth = match board_size {
        0..=9 => 1,
        10..=11 => 2,
        12..=14 => 3,
        _ => 4,
    };
    depth.min(board_size.max(1))
}

/// Emit one task per consistent placement of rows `0..split_depth`.
///
/// `board` must be empty or hold fewer than `split_depth` rows; it is left
/// unchanged on return. Returns the number of tasks emitted.
pub fn generate_tasks<F>(board: &mut BoardState, split_depth: usize, emit: &mut F) -> u64
where
    F: FnMut(Task),
{
    let row = board.placed_row();
    if row == split_depth {
        trace!(prefix = %board, "emitting task");
        emit(Task::snapshot(board));
        return 1;
    }

    let mut emitted = 0;
    for col in 0..board.size() {
        if board.is_free(row, col) {
            board.place(col);
            emitted += generate_tasks(board, split_depth, emit);
            board.unplace();
        }
    }
    emitted
}

/// Run the producer into `queue`, then mark production complete.
///
/// Blocks whenever the queue is full. Returns the number of tasks pushed.
pub fn produce(board_size: usize, split_depth: usize, queue: &BoundedQueue<Task>) -> u64 {
    let mut board = BoardState::new(board_size);
    let emitted = generate_tasks(&mut board, split_depth, &mut |task| queue.push(task));
    queue.mark_complete();
    debug!(tasks = emitted, split_depth, "producer finished");
    emitted
}

/// Number of tasks a given split depth produces, without queueing them.
pub fn count_tasks(board_size: usize, split_depth: usize) -> u64 {
    generate_tasks(
        &mut BoardState::new(board_size),
        split_depth,
        &mut |_task: Task| {},
    )
}
