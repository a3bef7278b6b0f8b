//! The ataxx board: cell occupancy plus whose turn it is.

use super::action::MoveError;
use super::position::{BOARD_SIZE, Position};
use super::rules::{self, JumpRule};
use super::types::{Cell, Color, Grid, MoveKind, Outcome, PossibleMoves, Scores};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Starting square of the black piece.
pub const BLACK_START: Position = Position::new(0, 3);

/// Starting square of the white piece.
pub const WHITE_START: Position = Position::new(BOARD_SIZE - 1, 3);

/// A 7x7 ataxx board.
///
/// The board validates and applies moves but never switches the turn on
/// its own; that is left to the caller (see [`Board::switch_turn`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    current_turn: Color,
    #[serde(default)]
    jump_rule: JumpRule,
}

impl Board {
    /// Creates a board in the starting position with white to move.
    #[instrument]
    pub fn new() -> Self {
        Self::with_jump_rule(JumpRule::default())
    }

    /// Creates a board in the starting position using the given jump table.
    #[instrument]
    pub fn with_jump_rule(jump_rule: JumpRule) -> Self {
        let mut grid = Grid::empty();
        grid.put(BLACK_START, Cell::Occupied(Color::Black));
        grid.put(WHITE_START, Cell::Occupied(Color::White));
        Self {
            grid,
            current_turn: Color::White,
            jump_rule,
        }
    }

    /// Creates a board from an arbitrary grid.
    #[instrument(skip(grid))]
    pub fn from_grid(grid: Grid, current_turn: Color, jump_rule: JumpRule) -> Self {
        Self {
            grid,
            current_turn,
            jump_rule,
        }
    }

    /// Creates an all-empty board, useful for setting up positions by hand.
    pub fn empty(current_turn: Color, jump_rule: JumpRule) -> Self {
        Self::from_grid(Grid::empty(), current_turn, jump_rule)
    }

    /// The side to move.
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    /// The jump table in force.
    pub fn jump_rule(&self) -> JumpRule {
        self.jump_rule
    }

    /// The underlying cells.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Gets the cell at `pos`, or `None` if off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.grid.get(pos)
    }

    /// Sets the cell at `pos`.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), MoveError> {
        self.grid.set(pos, cell)
    }

    /// Hands the turn to the other side.
    #[instrument(skip(self), fields(from = %self.current_turn))]
    pub fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
        debug!(to = %self.current_turn, "Turn switched");
    }

    /// Classifies a move for the side to move.
    #[instrument(skip(self), fields(turn = %self.current_turn))]
    pub fn is_move_valid(&self, start: Position, target: Position) -> MoveKind {
        rules::classify(&self.grid, self.current_turn, self.jump_rule, start, target)
    }

    /// In-range king neighbours of `pos`.
    pub fn adjacent_positions(&self, pos: Position) -> Vec<Position> {
        rules::adjacent_positions(pos)
    }

    /// Validates and applies a move for the side to move.
    ///
    /// On success the target receives a piece, the start is cleared for a
    /// jump, and adjacent opponent pieces convert. On failure the board is
    /// left untouched.
    #[instrument(skip(self), fields(turn = %self.current_turn))]
    pub fn make_move(&mut self, start: Position, target: Position) -> Result<MoveKind, MoveError> {
        let kind = self.is_move_valid(start, target);
        if kind == MoveKind::Invalid {
            warn!(%start, %target, "Invalid move");
            return Err(MoveError::InvalidMove { start, target });
        }

        let mover = Cell::Occupied(self.current_turn);
        // Both positions were bounds-checked by is_move_valid.
        self.grid.put(target, mover);
        if kind == MoveKind::Jump {
            self.grid.put(start, Cell::Empty);
        }
        let converted = self.convert_opponent_pieces(target);

        debug!(%kind, converted, "Move applied");
        Ok(kind)
    }

    /// Flips every opponent piece adjacent to `pos` to the side to move.
    ///
    /// Single pass: newly flipped pieces do not convert their own neighbours.
    /// Returns the number of pieces converted.
    #[instrument(skip(self))]
    pub fn convert_opponent_pieces(&mut self, pos: Position) -> usize {
        let opponent = Cell::Occupied(self.current_turn.opponent());
        let mover = Cell::Occupied(self.current_turn);
        let mut converted = 0;
        for neighbour in rules::adjacent_positions(pos) {
            if self.grid.get(neighbour) == Some(opponent) {
                self.grid.put(neighbour, mover);
                converted += 1;
            }
        }
        converted
    }

    /// Destinations for the piece at `pos`.
    ///
    /// Empty unless `pos` holds a piece of the side to move.
    #[instrument(skip(self))]
    pub fn possible_moves(&self, pos: Position) -> PossibleMoves {
        if self.grid.get(pos) != Some(Cell::Occupied(self.current_turn)) {
            return PossibleMoves::default();
        }
        self.destinations(pos)
    }

    /// Empty copy and jump destinations around `pos`, regardless of owner.
    fn destinations(&self, pos: Position) -> PossibleMoves {
        let empty = |p: &Position| self.grid.get(*p) == Some(Cell::Empty);
        PossibleMoves {
            copies: rules::adjacent_positions(pos).into_iter().filter(empty).collect(),
            jumps: rules::jump_positions(pos, self.jump_rule)
                .into_iter()
                .filter(empty)
                .collect(),
        }
    }

    /// Returns true if any piece of `color` has somewhere to go.
    #[instrument(skip(self))]
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.positions_of(color)
            .into_iter()
            .any(|pos| !self.destinations(pos).is_empty())
    }

    /// Every cell owned by `color`, row-major.
    pub fn positions_of(&self, color: Color) -> Vec<Position> {
        self.grid
            .iter()
            .filter(|(_, cell)| cell.is(color))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Piece counts per color.
    pub fn scores(&self) -> Scores {
        self.grid
            .iter()
            .fold(Scores::default(), |mut scores, (_, cell)| {
                match cell {
                    Cell::Occupied(Color::White) => scores.white += 1,
                    Cell::Occupied(Color::Black) => scores.black += 1,
                    Cell::Empty => {}
                }
                scores
            })
    }

    /// Returns true once no cell is empty.
    pub fn is_complete(&self) -> bool {
        self.grid.iter().all(|(_, cell)| cell != Cell::Empty)
    }

    /// Outcome by piece count.
    #[instrument(skip(self))]
    pub fn winner(&self) -> Outcome {
        rules::outcome_from_scores(self.scores())
    }

    /// Cells grouped by row, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.rows()
    }

    /// Formats the board as a human-readable diagram.
    ///
    /// `W` and `B` mark pieces, `.` an empty cell; rows and columns are
    /// labelled from 1.
    pub fn display(&self) -> String {
        let mut result = String::from("  ");
        for col in 1..=BOARD_SIZE {
            result.push_str(&format!(" {}", col));
        }
        for (row, cells) in self.rows().enumerate() {
            result.push_str(&format!("\n{} ", row + 1));
            for cell in cells {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(Color::White) => 'W',
                    Cell::Occupied(Color::Black) => 'B',
                };
                result.push(' ');
                result.push(symbol);
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
