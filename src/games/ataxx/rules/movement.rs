//! Movement geometry: adjacency, jump tables and move classification.

use super::super::{Cell, Color, Grid, MoveKind, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// King-move offsets, row-major.
const ADJACENT_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Two-step offsets along rows and columns only.
const ORTHOGONAL_JUMPS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Every offset at Chebyshev distance exactly two, row-major.
const EXTENDED_JUMPS: [(isize, isize); 16] = [
    (-2, -2),
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (-2, 2),
    (-1, -2),
    (-1, 2),
    (0, -2),
    (0, 2),
    (1, -2),
    (1, 2),
    (2, -2),
    (2, -1),
    (2, 0),
    (2, 1),
    (2, 2),
];

/// Which cells a jump may reach.
///
/// The same table drives both validation and move enumeration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JumpRule {
    /// Two cells straight up, down, left or right.
    #[default]
    Orthogonal,
    /// Any cell at king-distance two, including diagonal and knight-like offsets.
    Extended,
}

impl JumpRule {
    /// The (row, col) offsets a jump may take.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            JumpRule::Orthogonal => &ORTHOGONAL_JUMPS,
            JumpRule::Extended => &EXTENDED_JUMPS,
        }
    }

    /// Returns true if a move over the given distances is a jump under this rule.
    pub fn allows(self, row_diff: usize, col_diff: usize) -> bool {
        match self {
            JumpRule::Orthogonal => {
                (row_diff == 2 && col_diff == 0) || (row_diff == 0 && col_diff == 2)
            }
            JumpRule::Extended => {
                (row_diff == 2 && col_diff <= 2) || (col_diff == 2 && row_diff <= 2)
            }
        }
    }
}

/// In-range king neighbours of `pos`, row-major.
#[instrument]
pub fn adjacent_positions(pos: Position) -> Vec<Position> {
    ADJACENT_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| pos.offset(dr, dc))
        .collect()
}

/// In-range jump destinations of `pos` under `rule`, ignoring occupancy.
#[instrument]
pub fn jump_positions(pos: Position, rule: JumpRule) -> Vec<Position> {
    rule.offsets()
        .iter()
        .filter_map(|&(dr, dc)| pos.offset(dr, dc))
        .collect()
}

/// Classifies a move for the side `mover` on `grid`.
///
/// The start cell must hold a `mover` piece and the target must be empty;
/// off-board positions are always invalid.
#[instrument(skip(grid))]
pub fn classify(
    grid: &Grid,
    mover: Color,
    rule: JumpRule,
    start: Position,
    target: Position,
) -> MoveKind {
    if grid.get(start) != Some(Cell::Occupied(mover)) {
        return MoveKind::Invalid;
    }
    if grid.get(target) != Some(Cell::Empty) {
        return MoveKind::Invalid;
    }

    let (row_diff, col_diff) = start.distance(target);
    if row_diff <= 1 && col_diff <= 1 {
        // start == target is ruled out above: start is occupied, target empty.
        MoveKind::Copy
    } else if rule.allows(row_diff, col_diff) {
        MoveKind::Jump
    } else {
        MoveKind::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_corner_has_three_neighbours() {
        let adj = adjacent_positions(Position::new(0, 0));
        assert_eq!(
            adj,
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_centre_has_eight_neighbours() {
        let adj = adjacent_positions(Position::new(3, 3));
        assert_eq!(adj.len(), 8);
        assert!(!adj.contains(&Position::new(3, 3)));
    }

    #[test]
    fn test_offsets_agree_with_allows() {
        for rule in JumpRule::iter() {
            for &(dr, dc) in rule.offsets() {
                assert!(
                    rule.allows(dr.unsigned_abs(), dc.unsigned_abs()),
                    "{rule} offset ({dr}, {dc}) rejected by allows()"
                );
            }
            let table_size = (0..=2usize)
                .flat_map(|r| (0..=2usize).map(move |c| (r, c)))
                .filter(|&(r, c)| rule.allows(r, c))
                .map(|(r, c)| match (r, c) {
                    (0, _) | (_, 0) => 2,
                    _ => 4,
                })
                .sum::<usize>();
            assert_eq!(table_size, rule.offsets().len());
        }
    }

    #[test]
    fn test_orthogonal_rejects_diagonal_two() {
        assert!(!JumpRule::Orthogonal.allows(2, 2));
        assert!(!JumpRule::Orthogonal.allows(2, 1));
        assert!(JumpRule::Extended.allows(2, 2));
        assert!(JumpRule::Extended.allows(1, 2));
    }

    #[test]
    fn test_jump_rule_parses() {
        assert_eq!("extended".parse::<JumpRule>().unwrap(), JumpRule::Extended);
        assert_eq!(JumpRule::default(), JumpRule::Orthogonal);
    }
}
