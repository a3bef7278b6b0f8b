//! Game rules for ataxx.
//!
//! Pure functions over the grid, kept apart from board storage so the
//! board, the random agent and the bot server all share one definition.

pub mod movement;
pub mod win;

pub use movement::{JumpRule, adjacent_positions, classify, jump_positions};
pub use win::outcome_from_scores;
