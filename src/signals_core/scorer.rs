//! Signal strength heuristic for a ticker's correlated trades

const BASE_STRENGTH: f64 = 0.6;
const PER_TRADE: f64 = 0.05;
const PER_BUY: f64 = 0.1;
const MAX_STRENGTH: f64 = 1.0;

pub struct SignalScorer;

impl SignalScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compute signal strength (0.6-1.0) from correlated trade and buy counts
    ///
    /// `min(1.0, 0.6 + 0.05 * trade_count + 0.1 * buy_count)`, so the score is
    /// non-decreasing in both counts and saturates at 1.0.
    pub fn signal_strength(&self, trade_count: usize, buy_count: usize) -> f64 {
        let score = BASE_STRENGTH + PER_TRADE * trade_count as f64 + PER_BUY * buy_count as f64;
        score.min(MAX_STRENGTH)
    }

    /// Human-readable summary of the counts behind a score
    pub fn rationale(
        &self,
        trade_count: usize,
        buy_count: usize,
        nearest_days: Option<i64>,
    ) -> String {
        match nearest_days {
            Some(days) => format!(
                "{} notable trades with {} buys; closest bill action {} days away",
                trade_count, buy_count, days
            ),
            None => format!("{} notable trades with {} buys", trade_count, buy_count),
        }
    }
}

impl Default for SignalScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_strength_formula() {
        let scorer = SignalScorer::new();

        assert!(approx_eq(scorer.signal_strength(1, 0), 0.65));
        assert!(approx_eq(scorer.signal_strength(2, 1), 0.8));
        assert!(approx_eq(scorer.signal_strength(4, 2), 1.0));
    }

    #[test]
    fn test_strength_capped() {
        let scorer = SignalScorer::new();

        assert_eq!(scorer.signal_strength(50, 50), 1.0);
        assert_eq!(scorer.signal_strength(usize::MAX, 0), 1.0);
    }

    #[test]
    fn test_strength_bounds_and_monotonic() {
        let scorer = SignalScorer::new();

        for trades in 1..30 {
            for buys in 0..=trades {
                let score = scorer.signal_strength(trades, buys);
                assert!((0.6..=1.0).contains(&score), "score {} out of range", score);
                assert!(scorer.signal_strength(trades + 1, buys) >= score);
                assert!(scorer.signal_strength(trades, buys + 1) >= score);
            }
        }
    }

    #[test]
    fn test_rationale_with_distance() {
        let scorer = SignalScorer::new();
        assert_eq!(
            scorer.rationale(3, 2, Some(1)),
            "3 notable trades with 2 buys; closest bill action 1 days away"
        );
    }

    #[test]
    fn test_rationale_without_distance() {
        let scorer = SignalScorer::new();
        assert_eq!(scorer.rationale(3, 0, None), "3 notable trades with 0 buys");
    }
}
