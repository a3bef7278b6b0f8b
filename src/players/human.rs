//! Human player driven by cell clicks.

use super::{MoveSource, PlayerType};
use crate::games::ataxx::{Board, Color, MoveError, MoveKind, Position, Selection};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// One thing a person can do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum HumanInput {
    /// A cell was clicked.
    #[from]
    Click(Position),
    /// Give up the turn.
    Pass,
}

/// Human player using a two-click selection: first the piece, then the
/// destination.
///
/// Clicking another own piece while one is selected swaps the selection.
/// Clicking anywhere else attempts the move and clears the selection.
/// A pass clears any selection and hands the turn over.
pub struct HumanPlayer {
    name: String,
    color: Color,
    pending: Option<Position>,
    input_rx: mpsc::UnboundedReceiver<HumanInput>,
}

impl HumanPlayer {
    /// Creates a new human player reading clicks from `input_rx`.
    pub fn new(
        name: impl Into<String>,
        color: Color,
        input_rx: mpsc::UnboundedReceiver<HumanInput>,
    ) -> Self {
        let name = name.into();
        info!(name = %name, %color, "Creating human player");
        Self {
            name,
            color,
            pending: None,
            input_rx,
        }
    }

    /// Creates a human player together with the sender used to feed it clicks.
    pub fn with_channel(
        name: impl Into<String>,
        color: Color,
    ) -> (Self, mpsc::UnboundedSender<HumanInput>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(name, color, rx), tx)
    }

    /// The currently selected piece, if any.
    pub fn pending(&self) -> Option<Position> {
        self.pending
    }

    /// Feeds one click through the selection state machine.
    #[instrument(skip(self, board), fields(player = %self.name, pending = ?self.pending))]
    pub fn click(&mut self, board: &Board, pos: Position) -> Result<Selection, MoveError> {
        let owns = board.get(pos).is_some_and(|cell| cell.is(self.color));

        let Some(start) = self.pending else {
            if !owns {
                debug!(%pos, "Clicked a cell we do not own");
                return Err(MoveError::NotYourPiece(pos));
            }
            self.pending = Some(pos);
            return Ok(Selection::Partial(pos));
        };

        if owns {
            debug!(from = %start, to = %pos, "Selection swapped");
            self.pending = Some(pos);
            return Ok(Selection::Partial(pos));
        }

        self.pending = None;
        match board.is_move_valid(start, pos) {
            MoveKind::Invalid => {
                debug!(%start, target = %pos, "Destination rejected, selection cleared");
                Ok(Selection::None)
            }
            kind => {
                debug!(%start, target = %pos, %kind, "Move chosen");
                Ok(Selection::complete(start, pos))
            }
        }
    }
}

#[async_trait::async_trait]
impl MoveSource for HumanPlayer {
    fn player_type(&self) -> PlayerType {
        PlayerType::Human
    }

    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, board), fields(player = %self.name))]
    async fn select(&mut self, board: &Board) -> Result<Selection, MoveError> {
        debug!("Waiting for input");
        match self.input_rx.recv().await.ok_or(MoveError::InputClosed)? {
            HumanInput::Click(pos) => self.click(board, pos),
            HumanInput::Pass => {
                debug!("Passing");
                self.pending = None;
                Ok(Selection::Pass)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ataxx::{Cell, JumpRule, WHITE_START};

    fn white_human() -> HumanPlayer {
        HumanPlayer::with_channel("Alice", Color::White).0
    }

    #[test]
    fn test_first_click_must_be_own_piece() {
        let board = Board::new();
        let mut human = white_human();
        let empty = Position::new(3, 3);
        assert_eq!(human.click(&board, empty), Err(MoveError::NotYourPiece(empty)));
        assert_eq!(human.pending(), None);
    }

    #[test]
    fn test_two_click_flow_with_swap() {
        let mut board = Board::empty(Color::White, JumpRule::Orthogonal);
        let a = Position::new(6, 0);
        let b = Position::new(3, 3);
        board.set(a, Cell::Occupied(Color::White)).unwrap();
        board.set(b, Cell::Occupied(Color::White)).unwrap();

        let mut human = white_human();
        assert_eq!(human.click(&board, a), Ok(Selection::Partial(a)));
        assert_eq!(human.click(&board, b), Ok(Selection::Partial(b)));

        let d = Position::new(2, 2);
        assert_eq!(human.click(&board, d), Ok(Selection::complete(b, d)));
        assert_eq!(human.pending(), None);
    }

    #[test]
    fn test_invalid_destination_clears_selection() {
        let board = Board::new();
        let mut human = white_human();
        human.click(&board, WHITE_START).unwrap();
        assert_eq!(
            human.click(&board, Position::new(0, 0)),
            Ok(Selection::None)
        );
        assert_eq!(human.pending(), None);
    }

    #[test]
    fn test_clicking_opponent_as_destination_deselects() {
        let board = Board::new();
        let mut human = white_human();
        human.click(&board, WHITE_START).unwrap();
        assert_eq!(
            human.click(&board, crate::games::ataxx::BLACK_START),
            Ok(Selection::None)
        );
    }

    #[tokio::test]
    async fn test_select_reads_from_channel() {
        let board = Board::new();
        let (mut human, tx) = HumanPlayer::with_channel("Alice", Color::White);
        tx.send(WHITE_START.into()).unwrap();
        tx.send(Position::new(5, 3).into()).unwrap();

        assert_eq!(
            human.select(&board).await,
            Ok(Selection::Partial(WHITE_START))
        );
        assert_eq!(
            human.select(&board).await,
            Ok(Selection::complete(WHITE_START, Position::new(5, 3)))
        );
    }

    #[tokio::test]
    async fn test_pass_clears_pending_selection() {
        let board = Board::new();
        let (mut human, tx) = HumanPlayer::with_channel("Alice", Color::White);
        tx.send(HumanInput::Click(WHITE_START)).unwrap();
        tx.send(HumanInput::Pass).unwrap();

        human.select(&board).await.unwrap();
        assert_eq!(human.pending(), Some(WHITE_START));
        assert_eq!(human.select(&board).await, Ok(Selection::Pass));
        assert_eq!(human.pending(), None);
    }

    #[tokio::test]
    async fn test_closed_channel_is_an_error() {
        let board = Board::new();
        let (mut human, tx) = HumanPlayer::with_channel("Alice", Color::White);
        drop(tx);
        assert_eq!(human.select(&board).await, Err(MoveError::InputClosed));
    }
}
