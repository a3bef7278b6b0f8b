//! Move sources: the strategies that supply moves for one color.

mod human;
mod random_agent;
mod remote_agent;

pub use human::{HumanInput, HumanPlayer};
pub use random_agent::RandomAgent;
pub use remote_agent::RemoteAgent;

use crate::games::ataxx::{Board, Color, MoveError, Selection};
use serde::{Deserialize, Serialize};

/// Kind of move source.
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
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PlayerType {
    /// A person clicking cells.
    Human,
    /// The in-process random agent.
    LocalAgent,
    /// An agent reached over HTTP.
    ServerBot,
}

/// Trait for anything that can choose moves for one color.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// What kind of source this is.
    fn player_type(&self) -> PlayerType;

    /// The color this source plays.
    fn color(&self) -> Color;

    /// Display name.
    fn name(&self) -> &str;

    /// Asks for the next selection given the current board.
    ///
    /// Human and remote sources may suspend here; the board is never
    /// mutated by a source.
    async fn select(&mut self, board: &Board) -> Result<Selection, MoveError>;
}
