//! Board coordinates for ataxx.

use serde::{Deserialize, Serialize};

/// Side length of the (square) ataxx board.
pub const BOARD_SIZE: usize = 7;

/// A cell coordinate, 0-indexed from the top-left corner.
///
/// A position is a plain value: it carries no knowledge of the board it is
/// used with. Use [`Position::in_bounds`] or [`Position::offset`] to stay on
/// the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index (0 = top).
    pub row: usize,
    /// Column index (0 = left).
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if the position lies on the board.
    pub const fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major index into the cell array.
    pub(crate) const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Inverse of [`Position::index`].
    pub(crate) const fn from_index(index: usize) -> Self {
        Self::new(index / BOARD_SIZE, index % BOARD_SIZE)
    }

    /// Shifts the position by a signed offset, returning `None` if the
    /// result falls off the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let shifted = Self::new(row, col);
        shifted.in_bounds().then_some(shifted)
    }

    /// Row and column distance to another position.
    pub fn distance(self, other: Self) -> (usize, usize) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }

    /// Every position on the board in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Self::from_index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
