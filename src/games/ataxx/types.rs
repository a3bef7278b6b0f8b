//! Core domain types for ataxx.

use super::action::MoveError;
use super::position::{BOARD_SIZE, Position};
use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    /// White moves first.
    White,
    /// Black starts at the top of the board.
    Black,
}

impl Color {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody owns the cell.
    #[default]
    Empty,
    /// The cell holds a piece of the given color.
    Occupied(Color),
}

impl Cell {
    /// Returns true if the cell holds a piece of `color`.
    pub fn is(self, color: Color) -> bool {
        self == Cell::Occupied(color)
    }
}

/// Classification of a (start, target) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MoveKind {
    /// New piece on an adjacent cell; the origin keeps its piece.
    Copy,
    /// The piece relocates two cells away; the origin empties.
    Jump,
    /// Not a legal move.
    Invalid,
}

/// Piece counts per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Number of white pieces.
    pub white: usize,
    /// Number of black pieces.
    pub black: usize,
}

impl Scores {
    /// Count for one color.
    pub fn of(&self, color: Color) -> usize {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Total number of occupied cells.
    pub fn total(&self) -> usize {
        self.white + self.black
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The given color holds more cells.
    Winner(Color),
    /// Both colors hold the same number of cells.
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(color) => write!(f, "{} wins", color),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Destinations reachable from one piece.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PossibleMoves {
    /// Empty adjacent cells.
    pub copies: Vec<Position>,
    /// Empty cells reachable by a jump.
    pub jumps: Vec<Position>,
}

impl PossibleMoves {
    /// Returns true if there are no destinations at all.
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty() && self.jumps.is_empty()
    }

    /// Total number of destinations.
    pub fn len(&self) -> usize {
        self.copies.len() + self.jumps.len()
    }

    /// All destinations, copies first.
    pub fn destinations(&self) -> impl Iterator<Item = Position> + '_ {
        self.copies.iter().chain(self.jumps.iter()).copied()
    }
}

/// Fixed-size cell storage, addressed by [`Position`].
///
/// Always holds exactly `BOARD_SIZE * BOARD_SIZE` cells; deserialization
/// rejects any other length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: vec![Cell::Empty; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// Gets the cell at `pos`, or `None` if it is off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells.get(pos.index()).copied()
    }

    /// Sets the cell at `pos`.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), MoveError> {
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds(pos));
        }
        let slot = self
            .cells
            .get_mut(pos.index())
            .ok_or(MoveError::OutOfBounds(pos))?;
        *slot = cell;
        Ok(())
    }

    /// Writes a cell whose position the caller has already validated.
    pub(crate) fn put(&mut self, pos: Position, cell: Cell) {
        debug_assert!(pos.in_bounds(), "{pos} is off the board");
        if !pos.in_bounds() {
            return;
        }
        if let Some(slot) = self.cells.get_mut(pos.index()) {
            *slot = cell;
        }
    }

    /// Iterates every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (Position::from_index(index), *cell))
    }

    /// Cells grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_SIZE)
    }
}

/// Wire shape of [`Grid`] before its length is checked.
#[derive(Deserialize)]
struct RawGrid {
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = BOARD_SIZE * BOARD_SIZE;
        if raw.cells.len() != expected {
            return Err(format!(
                "grid has {} cells, expected {}",
                raw.cells.len(),
                expected
            ));
        }
        Ok(Self { cells: raw.cells })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}
