//! Move selections and the errors a move request can produce.
//!
//! A [`Selection`] is what a move source hands back to the turn controller.
//! It is never stored on the board; complete selections are applied
//! atomically by [`Board::make_move`](super::Board::make_move).

use super::{Color, Position};
use serde::{Deserialize, Serialize};

/// Result of asking a move source for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing selected (selection cleared, or nothing to do).
    None,
    /// A piece is selected and a destination is awaited.
    Partial(Position),
    /// A full move ready to be applied.
    Complete {
        /// Origin of the move.
        start: Position,
        /// Destination of the move.
        target: Position,
    },
    /// The side to move gives up its turn.
    Pass,
}

impl Selection {
    /// Creates a complete selection.
    pub fn complete(start: Position, target: Position) -> Self {
        Selection::Complete { start, target }
    }

    /// The selection as a list of positions: `[]`, `[p]` or `[start, target]`.
    pub fn positions(&self) -> Vec<Position> {
        match *self {
            Selection::None | Selection::Pass => Vec::new(),
            Selection::Partial(pos) => vec![pos],
            Selection::Complete { start, target } => vec![start, target],
        }
    }

    /// Returns true for a complete move.
    pub fn is_complete(&self) -> bool {
        matches!(self, Selection::Complete { .. })
    }
}

/// Failure talking to a remote agent.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RemoteError {
    /// The request never produced a response (connect, timeout, body read).
    #[display("transport failure: {}", _0)]
    Transport(#[error(not(source))] String),

    /// The peer answered with a non-success status code.
    #[display("remote agent answered with HTTP {}", _0)]
    Status(#[error(not(source))] u16),

    /// The response body does not follow the wire contract.
    #[display("malformed response: {}", _0)]
    Malformed(#[error(not(source))] String),
}

/// Error that can occur when selecting, validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MoveError {
    /// The pair fails the movement rules.
    #[display("can't move from {} to {}", start, target)]
    InvalidMove {
        /// Requested origin.
        start: Position,
        /// Requested destination.
        target: Position,
    },

    /// A human picked a cell their color does not own.
    #[display("{} is not your piece", _0)]
    NotYourPiece(#[error(not(source))] Position),

    /// The color owns no cells at all.
    #[display("{} has no pieces remaining", _0)]
    NoPiecesRemaining(#[error(not(source))] Color),

    /// No owned piece has a legal destination.
    #[display("{} has no valid moves", _0)]
    NoValidMoves(#[error(not(source))] Color),

    /// A coordinate lies outside the board.
    #[display("{} is off the board", _0)]
    OutOfBounds(#[error(not(source))] Position),

    /// The human input stream ended.
    #[display("input channel closed")]
    InputClosed,

    /// The remote agent could not supply a move.
    #[display("remote agent error: {}", _0)]
    #[from]
    RemoteAgent(RemoteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_positions() {
        let a = Position::new(1, 1);
        let b = Position::new(1, 2);
        assert!(Selection::None.positions().is_empty());
        assert_eq!(Selection::Partial(a).positions(), vec![a]);
        assert_eq!(Selection::complete(a, b).positions(), vec![a, b]);
        assert!(Selection::complete(a, b).is_complete());
        assert!(!Selection::Partial(a).is_complete());
        assert!(Selection::Pass.positions().is_empty());
    }

    #[test]
    fn test_remote_error_converts() {
        let err: MoveError = RemoteError::Status(503).into();
        assert_eq!(err, MoveError::RemoteAgent(RemoteError::Status(503)));
        assert!(err.to_string().contains("503"));
    }
}
