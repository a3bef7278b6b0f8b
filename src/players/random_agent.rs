//! Local agent that plays uniformly random legal moves.

use super::{MoveSource, PlayerType};
use crate::games::ataxx::{Board, Color, MoveError, Position, Selection};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Random agent.
///
/// Picks a piece uniformly among those with at least one destination, then
/// a destination uniformly among that piece's copies and jumps.
pub struct RandomAgent {
    name: String,
    color: Color,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    /// Creates an agent seeded from system entropy.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self::from_rng(name, color, ChaCha8Rng::from_entropy())
    }

    /// Creates an agent with a fixed seed, for reproducible games.
    pub fn with_seed(name: impl Into<String>, color: Color, seed: u64) -> Self {
        Self::from_rng(name, color, ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(name: impl Into<String>, color: Color, rng: ChaCha8Rng) -> Self {
        Self {
            name: name.into(),
            color,
            rng,
        }
    }

    /// Chooses a move synchronously.
    #[instrument(skip(self, board), fields(agent = %self.name, color = %self.color))]
    pub fn choose(&mut self, board: &Board) -> Result<(Position, Position), MoveError> {
        let mut pieces = board.positions_of(self.color);
        if pieces.is_empty() {
            return Err(MoveError::NoPiecesRemaining(self.color));
        }

        pieces.shuffle(&mut self.rng);
        for start in pieces {
            let moves = board.possible_moves(start);
            let destinations: Vec<Position> = moves.destinations().collect();
            if let Some(&target) = destinations.choose(&mut self.rng) {
                debug!(%start, %target, options = destinations.len(), "Agent chose move");
                return Ok((start, target));
            }
        }

        Err(MoveError::NoValidMoves(self.color))
    }
}

#[async_trait::async_trait]
impl MoveSource for RandomAgent {
    fn player_type(&self) -> PlayerType {
        PlayerType::LocalAgent
    }

    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn select(&mut self, board: &Board) -> Result<Selection, MoveError> {
        let (start, target) = self.choose(board)?;
        Ok(Selection::complete(start, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ataxx::{Cell, JumpRule, MoveKind};
    use std::collections::HashSet;

    #[test]
    fn test_chooses_legal_moves() {
        let board = Board::new();
        let mut agent = RandomAgent::with_seed("bot", Color::White, 7);
        for _ in 0..50 {
            let (start, target) = agent.choose(&board).unwrap();
            assert_ne!(board.is_move_valid(start, target), MoveKind::Invalid);
        }
    }

    #[test]
    fn test_skips_pieces_without_destinations() {
        // (0,0) is boxed in by black; (6,6) is the only piece that can move.
        let mut board = Board::empty(Color::White, JumpRule::Orthogonal);
        board.set(Position::new(0, 0), Cell::Occupied(Color::White)).unwrap();
        for pos in [(0, 1), (1, 0), (1, 1), (0, 2), (2, 0)] {
            board
                .set(Position::new(pos.0, pos.1), Cell::Occupied(Color::Black))
                .unwrap();
        }
        board.set(Position::new(6, 6), Cell::Occupied(Color::White)).unwrap();

        let mut agent = RandomAgent::with_seed("bot", Color::White, 1);
        for _ in 0..50 {
            let (start, _) = agent.choose(&board).unwrap();
            assert_eq!(start, Position::new(6, 6));
        }
    }

    #[test]
    fn test_covers_every_destination() {
        let board = Board::new();
        let mut agent = RandomAgent::with_seed("bot", Color::White, 42);
        let seen: HashSet<_> = (0..500).map(|_| agent.choose(&board).unwrap().1).collect();
        let expected: HashSet<_> = board.possible_moves(crate::games::ataxx::WHITE_START)
            .destinations()
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_no_pieces_remaining() {
        let board = Board::empty(Color::White, JumpRule::Orthogonal);
        let mut agent = RandomAgent::with_seed("bot", Color::White, 0);
        assert_eq!(
            agent.choose(&board),
            Err(MoveError::NoPiecesRemaining(Color::White))
        );
    }

    #[test]
    fn test_no_valid_moves() {
        let mut board = Board::empty(Color::White, JumpRule::Orthogonal);
        for pos in Position::all() {
            board.set(pos, Cell::Occupied(Color::Black)).unwrap();
        }
        board.set(Position::new(3, 3), Cell::Occupied(Color::White)).unwrap();
        let mut agent = RandomAgent::with_seed("bot", Color::White, 0);
        assert_eq!(agent.choose(&board), Err(MoveError::NoValidMoves(Color::White)));
    }

    #[test]
    fn test_same_seed_same_game() {
        let board = Board::new();
        let mut a = RandomAgent::with_seed("a", Color::White, 99);
        let mut b = RandomAgent::with_seed("b", Color::White, 99);
        for _ in 0..10 {
            assert_eq!(a.choose(&board), b.choose(&board));
        }
    }
}
