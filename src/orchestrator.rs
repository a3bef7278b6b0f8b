//! Turn controller: drives one game session between two move sources.

use crate::games::ataxx::{Board, Color, MoveError, MoveKind, Outcome, Position, PossibleMoves, Scores, Selection};
use crate::players::{MoveSource, PlayerType};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Reason shown when a complete move fails board validation.
pub const REJECTED_MOVE_REASON: &str = "can't move there";

/// Reason attached to a pass the side to move asked for.
pub const VOLUNTARY_PASS_REASON: &str = "passed by choice";

/// Messages sent from the controller to whoever renders the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece was selected; highlight its destinations.
    Selected {
        /// Side that selected.
        color: Color,
        /// Selected piece.
        position: Position,
        /// Copy and jump destinations to highlight.
        moves: PossibleMoves,
    },
    /// The selection was cleared.
    Deselected {
        /// Side whose selection cleared.
        color: Color,
    },
    /// A request was refused; the board did not change.
    MoveRejected {
        /// Side whose request was refused.
        color: Color,
        /// Human-readable reason.
        reason: String,
    },
    /// A move was applied.
    MoveMade {
        /// Side that moved.
        color: Color,
        /// Origin.
        start: Position,
        /// Destination.
        target: Position,
        /// Copy or jump.
        kind: MoveKind,
        /// Scores after the move.
        scores: Scores,
    },
    /// A side gave up its turn, by choice or because it could not move.
    Passed {
        /// Side that passed.
        color: Color,
        /// Why it passed.
        reason: String,
    },
    /// The other side is now to move.
    TurnChanged {
        /// Side to move.
        to: Color,
    },
    /// A move source failed; the board did not change.
    SourceFailed {
        /// Side whose source failed.
        color: Color,
        /// The failure.
        error: MoveError,
    },
    /// The game ended.
    GameOver {
        /// Winner or draw.
        outcome: Outcome,
        /// Final scores.
        scores: Scores,
    },
}

/// Where the controller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the active source to supply a move.
    AwaitingMove,
    /// No further moves are accepted.
    GameOver(Outcome),
}

/// What a single [`TurnController::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Selection changed or cleared; still the same side's turn.
    Awaiting,
    /// The request was refused; still the same side's turn.
    Rejected,
    /// A move was applied and the turn passed to the opponent.
    Moved(MoveKind),
    /// The side to move passed and the turn went to the opponent.
    Passed,
    /// The game ended.
    Finished(Outcome),
}

/// Error returned by the turn controller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ControllerError {
    /// The game has already ended.
    #[display("game is already over ({})", _0)]
    GameOver(#[error(not(source))] Outcome),

    /// The active move source failed without producing a move.
    #[display("move source failed: {}", _0)]
    Source(MoveError),

    /// The sources do not fit the seats they were given.
    #[display("invalid setup: {}", _0)]
    Setup(#[error(not(source))] String),
}

/// Orchestrates one game between two move sources.
///
/// The controller owns turn switching: [`Board::make_move`] never changes
/// the side to move. A side with no legal move passes, and any side may pass
/// by choice; two passes in a row end the game.
///
/// A human whose move the board refuses is asked again. An agent whose move
/// the board refuses fails the step, so [`TurnController::run`] cannot spin
/// on an agent that keeps answering with the same illegal move.
pub struct TurnController {
    board: Board,
    white: Box<dyn MoveSource>,
    black: Box<dyn MoveSource>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    phase: Phase,
    selection: Option<Position>,
    consecutive_passes: u8,
}

impl TurnController {
    /// Creates a controller for a fresh session.
    ///
    /// `white` and `black` must play the colors of their seats.
    #[instrument(skip_all, fields(white = %white.name(), black = %black.name()))]
    pub fn new(
        board: Board,
        white: Box<dyn MoveSource>,
        black: Box<dyn MoveSource>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<Self, ControllerError> {
        for (seat, source) in [(Color::White, &white), (Color::Black, &black)] {
            if source.color() != seat {
                warn!(%seat, source = %source.name(), "Source plays the wrong color");
                return Err(ControllerError::Setup(format!(
                    "{} plays {} but sits in the {} seat",
                    source.name(),
                    source.color(),
                    seat
                )));
            }
        }

        info!(
            white_type = %white.player_type(),
            black_type = %black.player_type(),
            "Starting game session"
        );
        Ok(Self {
            board,
            white,
            black,
            event_tx,
            phase: Phase::AwaitingMove,
            selection: None,
            consecutive_passes: 0,
        })
    }

    /// The board being played.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The piece currently selected by the side to move, if any.
    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    /// The source whose turn it is.
    pub fn active(&self) -> &dyn MoveSource {
        match self.board.current_turn() {
            Color::White => self.white.as_ref(),
            Color::Black => self.black.as_ref(),
        }
    }

    /// Runs one request/response cycle with the active source.
    #[instrument(skip(self), fields(turn = %self.board.current_turn()))]
    pub async fn step(&mut self) -> Result<Step, ControllerError> {
        if let Phase::GameOver(outcome) = self.phase {
            return Err(ControllerError::GameOver(outcome));
        }
        if self.board.is_complete() {
            return Ok(Step::Finished(self.finish()));
        }

        let color = self.board.current_turn();
        if !self.board.has_legal_move(color) {
            let reason = if self.board.positions_of(color).is_empty() {
                MoveError::NoPiecesRemaining(color)
            } else {
                MoveError::NoValidMoves(color)
            };
            return Ok(self.pass_turn(color, reason.to_string()));
        }

        let source = match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        debug!(player = %source.name(), "Waiting for move");
        let result = source.select(&self.board).await;

        match result {
            Ok(Selection::None) => {
                self.selection = None;
                self.notify(GameEvent::Deselected { color });
                Ok(Step::Awaiting)
            }
            Ok(Selection::Partial(position)) => {
                self.selection = Some(position);
                let moves = self.board.possible_moves(position);
                self.notify(GameEvent::Selected {
                    color,
                    position,
                    moves,
                });
                Ok(Step::Awaiting)
            }
            Ok(Selection::Complete { start, target }) => self.apply(color, start, target),
            Ok(Selection::Pass) => Ok(self.pass_turn(color, VOLUNTARY_PASS_REASON.to_string())),
            Err(
                e @ (MoveError::NotYourPiece(_)
                | MoveError::InvalidMove { .. }
                | MoveError::OutOfBounds(_)),
            ) if self.active().player_type() == PlayerType::Human => {
                debug!(error = %e, "Selection refused");
                self.notify(GameEvent::MoveRejected {
                    color,
                    reason: e.to_string(),
                });
                Ok(Step::Rejected)
            }
            Err(e @ (MoveError::NoPiecesRemaining(_) | MoveError::NoValidMoves(_))) => {
                Ok(self.pass_turn(color, e.to_string()))
            }
            Err(e) => Err(self.source_failed(color, e)),
        }
    }

    /// Gives up the turn of the side to move.
    ///
    /// For front ends that collect a pass outside [`TurnController::step`].
    /// Counts toward the two consecutive passes that end the game.
    #[instrument(skip(self), fields(turn = %self.board.current_turn()))]
    pub fn pass(&mut self) -> Result<Step, ControllerError> {
        if let Phase::GameOver(outcome) = self.phase {
            return Err(ControllerError::GameOver(outcome));
        }
        let color = self.board.current_turn();
        Ok(self.pass_turn(color, VOLUNTARY_PASS_REASON.to_string()))
    }

    /// Steps until the game ends.
    ///
    /// Source failures are returned to the caller; the session stays
    /// usable and `run` may be called again.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<Outcome, ControllerError> {
        info!("Starting game orchestration");
        loop {
            if let Step::Finished(outcome) = self.step().await? {
                return Ok(outcome);
            }
        }
    }

    fn apply(
        &mut self,
        color: Color,
        start: Position,
        target: Position,
    ) -> Result<Step, ControllerError> {
        self.selection = None;
        let kind = match self.board.make_move(start, target) {
            Ok(kind) => kind,
            Err(e) if self.active().player_type() == PlayerType::Human => {
                debug!(error = %e, "Board refused move");
                self.notify(GameEvent::MoveRejected {
                    color,
                    reason: REJECTED_MOVE_REASON.to_string(),
                });
                return Ok(Step::Rejected);
            }
            Err(e) => return Err(self.source_failed(color, e)),
        };

        self.consecutive_passes = 0;
        let scores = self.board.scores();
        info!(%color, %start, %target, %kind, white = scores.white, black = scores.black, "Move made");
        self.notify(GameEvent::MoveMade {
            color,
            start,
            target,
            kind,
            scores,
        });

        if self.board.is_complete() {
            return Ok(Step::Finished(self.finish()));
        }
        self.switch_turn();
        Ok(Step::Moved(kind))
    }

    fn pass_turn(&mut self, color: Color, reason: String) -> Step {
        self.consecutive_passes += 1;
        self.selection = None;
        info!(%color, %reason, passes = self.consecutive_passes, "Pass");
        self.notify(GameEvent::Passed { color, reason });

        if self.consecutive_passes >= 2 {
            return Step::Finished(self.finish());
        }
        self.switch_turn();
        Step::Passed
    }

    fn source_failed(&mut self, color: Color, error: MoveError) -> ControllerError {
        warn!(%error, "Move source failed");
        self.selection = None;
        self.notify(GameEvent::SourceFailed {
            color,
            error: error.clone(),
        });
        ControllerError::Source(error)
    }

    fn switch_turn(&mut self) {
        self.board.switch_turn();
        self.selection = None;
        self.notify(GameEvent::TurnChanged {
            to: self.board.current_turn(),
        });
    }

    fn finish(&mut self) -> Outcome {
        let outcome = self.board.winner();
        let scores = self.board.scores();
        info!(%outcome, white = scores.white, black = scores.black, "Game over");
        self.phase = Phase::GameOver(outcome);
        self.notify(GameEvent::GameOver { outcome, scores });
        outcome
    }

    fn notify(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}
