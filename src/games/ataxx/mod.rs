//! Ataxx: a two-player territory-conversion game on a 7x7 grid.

mod action;
mod board;
mod position;
mod types;

pub mod rules;
pub mod wire;

pub use action::{MoveError, RemoteError, Selection};
pub use board::{BLACK_START, Board, WHITE_START};
pub use position::{BOARD_SIZE, Position};
pub use rules::JumpRule;
pub use types::{Cell, Color, Grid, MoveKind, Outcome, PossibleMoves, Scores};
