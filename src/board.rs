//! Board occupancy state for the N-Queens search
//!
//! A board tracks which columns and diagonals are attacked by the queens
//! committed so far, so that a candidate square can be checked in O(1).
//! Queens are always committed row by row: row `r` is placed only after rows
//! `0..r`, which keeps the representation to three occupancy sets plus the
//! list of committed columns.

use std::fmt;

/// Largest board size accepted by the search.
pub const MAX_BOARD_SIZE: usize = 32;

/// Occupancy state of a partially filled board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    size: usize,
    /// Column of the queen committed in each row `0..placed_row`.
    queens: Vec<usize>,
    columns: Vec<bool>,
    /// Indexed by `row + col`.
    positive_diagonals: Vec<bool>,
    /// Indexed by `row - col + size - 1`.
    negative_diagonals: Vec<bool>,
}

impl BoardState {
    /// Create an empty board of the given size.
    pub fn new(size: usize) -> Self {
        let diagonals = (2 * size).saturating_sub(1);
        Self {
            size,
            queens: Vec::with_capacity(size),
            columns: vec![false; size],
            positive_diagonals: vec![false; diagonals],
            negative_diagonals: vec![false; diagonals],
        }
    }

    /// Build a board by committing `columns[r]` in row `r`, in order.
    ///
    /// Returns `None` if any placement conflicts with an earlier one or lies
    /// off the board.
    pub fn from_queens(size: usize, columns: &[usize]) -> Option<Self> {
        if columns.len() > size {
            return None;
        }
        let mut board = Self::new(size);
        for &col in columns {
            if col >= size || !board.is_free(board.placed_row(), col) {
                return None;
            }
            board.place(col);
        }
        Some(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of rows already holding a queen.
    #[inline]
    pub fn placed_row(&self) -> usize {
        self.queens.len()
    }

    /// Whether every row holds a queen.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.queens.len() == self.size
    }

    /// Committed column per row, in row order.
    pub fn queens(&self) -> &[usize] {
        &self.queens
    }

    #[inline]
    fn negative_index(&self, row: usize, col: usize) -> usize {
        row + self.size - 1 - col
    }

    /// O(1) check that (row, col) is attacked by no committed queen.
    ///
    /// # Panics
    ///
    /// Panics if `col >= size`. `row` must also be below `size`; larger rows
    /// may panic or read a neighbouring diagonal.
    #[inline]
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        !self.columns[col]
            && !self.positive_diagonals[row + col]
            && !self.negative_diagonals[self.negative_index(row, col)]
    }

    /// Commit a queen at `col` in the next free row.
    ///
    /// The caller must have checked [`is_free`](Self::is_free) first.
    ///
    /// # Panics
    ///
    /// Panics if `col >= size`. Debug builds also panic if the board is
    /// already complete or the square is attacked.
    #[inline]
    pub fn place(&mut self, col: usize) {
        let row = self.placed_row();
        debug_assert!(row < self.size, "board is already complete");
        debug_assert!(self.is_free(row, col), "square ({row}, {col}) is attacked");

        let neg = self.negative_index(row, col);
        self.columns[col] = true;
        self.positive_diagonals[row + col] = true;
        self.negative_diagonals[neg] = true;
        self.queens.push(col);
    }

    /// Undo the most recent [`place`](Self::place).
    #[inline]
    pub fn unplace(&mut self) {
        if let Some(col) = self.queens.pop() {
            let row = self.queens.len();
            let neg = self.negative_index(row, col);
            self.columns[col] = false;
            self.positive_diagonals[row + col] = false;
            self.negative_diagonals[neg] = false;
        }
    }

    /// Check that the occupancy sets exactly reflect the committed queens.
    pub fn is_consistent(&self) -> bool {
        if self.queens.len() > self.size
            || self.columns.len() != self.size
            || self.positive_diagonals.len() != (2 * self.size).saturating_sub(1)
            || self.negative_diagonals.len() != self.positive_diagonals.len()
        {
            return false;
        }

        let mut columns = vec![false; self.size];
        let mut positive = vec![false; self.positive_diagonals.len()];
        let mut negative = vec![false; self.negative_diagonals.len()];

        for (row, &col) in self.queens.iter().enumerate() {
            if col >= self.size {
                return false;
            }
            let neg = self.negative_index(row, col);
            if columns[col] || positive[row + col] || negative[neg] {
                return false;
            }
            columns[col] = true;
            positive[row + col] = true;
            negative[neg] = true;
        }

        columns == self.columns
            && positive == self.positive_diagonals
            && negative == self.negative_diagonals
    }
}

impl fmt::Display for BoardState {
    /// Formats as `[c0 c1 ... ]`, one column per committed row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for col in &self.queens {
            write!(f, "{} ", col)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn test_is_free_column_out_of_range() {
        let board = BoardState::new(8);
        board.is_free(0, 8);
    }

    #[test]
    #[should_panic]
    fn test_place_column_out_of_range() {
        let mut board = BoardState::new(4);
        board.place(4);
    }

    #[test]
    fn test_empty_board() {
        let board = BoardState::new(8);
        assert_eq!(board.size(), 8);
        assert_eq!(board.placed_row(), 0);
        assert!(!board.is_complete());
        assert!(board.is_consistent());
        assert!((0..8).all(|c| board.is_free(0, c)));
    }

    #[test]
    fn test_place_blocks_column_and_diagonals() {
        let mut board = BoardState::new(4);
        board.place(1);

        assert_eq!(board.placed_row(), 1);
        // same column
        assert!(!board.is_free(1, 1));
        // both diagonals
        assert!(!board.is_free(1, 0));
        assert!(!board.is_free(1, 2));
        assert!(board.is_free(1, 3));
        assert!(!board.is_free(2, 3));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_unplace_restores_state() {
        let empty = BoardState::new(6);
        let mut board = empty.clone();
        board.place(2);
        board.place(4);
        board.unplace();
        board.unplace();
        assert_eq!(board, empty);

        // Unplacing an empty board is a no-op
        board.unplace();
        assert_eq!(board, empty);
    }

    #[test]
    fn test_from_queens() {
        let board = BoardState::from_queens(4, &[1, 3, 0, 2]).unwrap();
        assert!(board.is_complete());
        assert!(board.is_consistent());
        assert_eq!(board.queens(), &[1, 3, 0, 2]);

        assert!(BoardState::from_queens(4, &[0, 1]).is_none());
        assert!(BoardState::from_queens(4, &[4]).is_none());
        assert!(BoardState::from_queens(2, &[0, 1, 0]).is_none());
    }

    #[test]
    fn test_inconsistent_board_detected() {
        let mut board = BoardState::from_queens(5, &[0, 2]).unwrap();
        board.columns[4] = true;
        assert!(!board.is_consistent());

        let mut board = BoardState::from_queens(5, &[0, 2]).unwrap();
        board.queens.push(1);
        assert!(!board.is_consistent());
    }

    #[test]
    fn test_single_square_board() {
        let mut board = BoardState::new(1);
        assert!(board.is_free(0, 0));
        board.place(0);
        assert!(board.is_complete());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_display() {
        let board = BoardState::from_queens(4, &[1, 3]).unwrap();
        assert_eq!(board.to_string(), "[1 3 ]");
    }
}
