//! Strictly Ataxx - a type-safe ataxx engine
//!
//! This library provides the ataxx rules engine, pluggable move sources and
//! the turn controller that drives a game between them.
//!
//! # Architecture
//!
//! - **Games**: Board, move validation and execution, scoring
//! - **Players**: Human (two-click), local random agent, remote HTTP agent
//! - **Orchestrator**: Turn controller emitting game events
//! - **Bot server**: HTTP endpoint answering the remote-agent protocol
//!
//! # Example
//!
//! ```no_run
//! use strictly_ataxx::{Board, Color, RandomAgent, TurnController};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (event_tx, _event_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut controller = TurnController::new(
//!     Board::new(),
//!     Box::new(RandomAgent::new("white", Color::White)),
//!     Box::new(RandomAgent::new("black", Color::Black)),
//!     event_tx,
//! )?;
//! let outcome = controller.run().await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bot_server;
mod config;
mod games;
mod orchestrator;
mod players;
mod terminal;

// Crate-level exports - Game types
pub use games::ataxx::{
    BLACK_START, BOARD_SIZE, Board, Cell, Color, Grid, JumpRule, MoveError, MoveKind, Outcome,
    Position, PossibleMoves, RemoteError, Scores, Selection, WHITE_START,
};

// Crate-level exports - Rules and wire format
pub use games::ataxx::{rules, wire};

// Crate-level exports - Move sources
pub use players::{HumanInput, HumanPlayer, MoveSource, PlayerType, RandomAgent, RemoteAgent};

// Crate-level exports - Turn controller
pub use orchestrator::{
    ControllerError, GameEvent, Phase, REJECTED_MOVE_REASON, Step, TurnController,
    VOLUNTARY_PASS_REASON,
};

// Crate-level exports - Configuration
pub use config::{BuiltSource, ConfigError, GameConfig, PlayerConfig};

// Crate-level exports - Bot server
pub use bot_server::{router as bot_router, serve as serve_bot};

// Crate-level exports - Terminal front end
pub use terminal::{parse_input, parse_position, play as play_in_terminal};
