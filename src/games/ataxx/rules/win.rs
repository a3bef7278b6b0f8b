//! Win detection for ataxx.

use super::super::{Color, Outcome, Scores};
use tracing::instrument;

/// Decides the outcome from final piece counts.
///
/// The side holding more cells wins; equal counts are a draw.
#[instrument]
pub fn outcome_from_scores(scores: Scores) -> Outcome {
    match scores.white.cmp(&scores.black) {
        std::cmp::Ordering::Greater => Outcome::Winner(Color::White),
        std::cmp::Ordering::Less => Outcome::Winner(Color::Black),
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_count_wins() {
        assert_eq!(
            outcome_from_scores(Scores { white: 25, black: 24 }),
            Outcome::Winner(Color::White)
        );
        assert_eq!(
            outcome_from_scores(Scores { white: 10, black: 39 }),
            Outcome::Winner(Color::Black)
        );
    }

    #[test]
    fn test_equal_counts_draw() {
        assert_eq!(outcome_from_scores(Scores { white: 3, black: 3 }), Outcome::Draw);
    }

    #[test]
    fn test_wiped_out_side_loses() {
        assert_eq!(
            outcome_from_scores(Scores { white: 0, black: 49 }),
            Outcome::Winner(Color::Black)
        );
    }
}
