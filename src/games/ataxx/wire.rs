//! Wire format spoken with remote agents.
//!
//! A request carries the whole board as 49 one-character strings in
//! row-major order (`-` empty, `B` white, `N` black) and the side to move.
//! A response carries a flat list of 1-indexed coordinates,
//! `[start_row, start_col, target_row, target_col]`.

use super::action::RemoteError;
use super::position::{BOARD_SIZE, Position};
use super::rules::JumpRule;
use super::types::{Cell, Color, Grid};
use super::Board;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

const EMPTY_SYMBOL: &str = "-";
const WHITE_SYMBOL: &str = "B";
const BLACK_SYMBOL: &str = "N";

/// Body sent to a remote agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Cells in row-major order.
    pub board: Vec<String>,
    /// Side to move, `B` or `N`.
    #[serde(rename = "currentTurn")]
    pub current_turn: String,
}

/// Body returned by a remote agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Flat list of 1-indexed row/column pairs.
    #[serde(rename = "move")]
    pub coordinates: Vec<i64>,
}

/// Wire symbol for a color.
pub fn color_symbol(color: Color) -> &'static str {
    match color {
        Color::White => WHITE_SYMBOL,
        Color::Black => BLACK_SYMBOL,
    }
}

fn cell_symbol(cell: Cell) -> &'static str {
    match cell {
        Cell::Empty => EMPTY_SYMBOL,
        Cell::Occupied(color) => color_symbol(color),
    }
}

fn parse_color(symbol: &str) -> Result<Color, RemoteError> {
    match symbol {
        WHITE_SYMBOL => Ok(Color::White),
        BLACK_SYMBOL => Ok(Color::Black),
        other => Err(RemoteError::Malformed(format!("unknown color symbol {:?}", other))),
    }
}

fn parse_cell(symbol: &str) -> Result<Cell, RemoteError> {
    if symbol == EMPTY_SYMBOL {
        return Ok(Cell::Empty);
    }
    parse_color(symbol).map(Cell::Occupied)
}

impl MoveRequest {
    /// Encodes a board snapshot.
    #[instrument(skip(board), fields(turn = %board.current_turn()))]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: board
                .grid()
                .iter()
                .map(|(_, cell)| cell_symbol(cell).to_string())
                .collect(),
            current_turn: color_symbol(board.current_turn()).to_string(),
        }
    }

    /// Decodes the request back into a board using the given jump table.
    #[instrument(skip(self))]
    pub fn to_board(&self, jump_rule: JumpRule) -> Result<Board, RemoteError> {
        let expected = BOARD_SIZE * BOARD_SIZE;
        if self.board.len() != expected {
            warn!(cells = self.board.len(), "Board has wrong number of cells");
            return Err(RemoteError::Malformed(format!(
                "expected {} cells, got {}",
                expected,
                self.board.len()
            )));
        }

        let mut grid = Grid::empty();
        for (pos, symbol) in Position::all().zip(&self.board) {
            grid.set(pos, parse_cell(symbol)?)
                .map_err(|e| RemoteError::Malformed(e.to_string()))?;
        }
        let turn = parse_color(&self.current_turn)?;
        Ok(Board::from_grid(grid, turn, jump_rule))
    }
}

impl MoveResponse {
    /// Encodes a move as 1-indexed coordinates.
    pub fn from_move(start: Position, target: Position) -> Self {
        let one_based = |n: usize| n as i64 + 1;
        Self {
            coordinates: vec![
                one_based(start.row),
                one_based(start.col),
                one_based(target.row),
                one_based(target.col),
            ],
        }
    }

    /// Decodes the (start, target) pair.
    ///
    /// The list must hold exactly one start/target pair and every
    /// coordinate must lie on the board.
    #[instrument(skip(self), fields(coordinates = ?self.coordinates))]
    pub fn to_move(&self) -> Result<(Position, Position), RemoteError> {
        let [r1, c1, r2, c2] = self.coordinates.as_slice() else {
            return Err(RemoteError::Malformed(format!(
                "expected 4 coordinates, got {}",
                self.coordinates.len()
            )));
        };

        let zero_based = |n: i64| -> Result<usize, RemoteError> {
            n.checked_sub(1)
                .and_then(|i| usize::try_from(i).ok())
                .filter(|&i| i < BOARD_SIZE)
                .ok_or_else(|| RemoteError::Malformed(format!("coordinate {} is off the board", n)))
        };

        let start = Position::new(zero_based(*r1)?, zero_based(*c1)?);
        let target = Position::new(zero_based(*r2)?, zero_based(*c2)?);
        debug!(%start, %target, "Decoded remote move");
        Ok((start, target))
    }
}
