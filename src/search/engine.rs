//! Backtracking search engine
//!
//! Completes a partial board row by row. Each candidate square is checked in
//! O(1) against the board's occupancy sets; a queen is placed, the next row
//! is searched, and the queen is removed again whether or not that subtree
//! held any solutions. The board passed in is therefore left exactly as it
//! was found.

use crate::board::BoardState;

/// Count the ways to complete `board` from its current row.
pub fn solve(board: &mut BoardState) -> u64 {
    debug_assert!(board.is_consistent(), "search started on an inconsistent board");
    solve_row(board, &mut |_: &BoardState| {})
}

/// Like [`solve`], calling `on_solution` with every completed board.
pub fn solve_with<F>(board: &mut BoardState, on_solution: &mut F) -> u64
where
    F: FnMut(&BoardState),
{
    debug_assert!(board.is_consistent(), "search started on an inconsistent board");
    solve_row(board, on_solution)
}

fn solve_row<F>(board: &mut BoardState, on_solution: &mut F) -> u64
where
    F: FnMut(&BoardState),
{
    let row = board.placed_row();
    if row == board.size() {
        on_solution(board);
        return 1;
    }

    let mut count = 0;
    for col in 0..board.size() {
        if board.is_free(row, col) {
            board.place(col);
            count += solve_row(board, on_solution);
            board.unplace();
        }
    }
    count
}

/// Count all solutions for an `n`x`n` board on the calling thread.
pub fn count_solutions(n: usize) -> u64 {
    solve(&mut BoardState::new(n))
}
