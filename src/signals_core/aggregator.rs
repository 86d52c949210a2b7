//! Per-ticker grouping and ranking of correlated pairs

use super::correlator::CorrelatedSignal;
use super::scorer::SignalScorer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One ranked entry of the "strongest signals" result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSignal {
    pub ticker: String,
    pub sector: String,
    pub signal_strength: f64,
    pub rationale: String,
}

/// Counts accumulated over all correlated pairs of one (ticker, sector)
#[derive(Debug, Clone, PartialEq)]
pub struct TickerMetrics {
    pub ticker: String,
    pub sector: String,
    pub trade_count: usize,
    pub buy_count: usize,
    pub nearest_days: Option<i64>,
}

impl TickerMetrics {
    pub fn new(ticker: String, sector: String) -> Self {
        Self {
            ticker,
            sector,
            trade_count: 0,
            buy_count: 0,
            nearest_days: None,
        }
    }

    pub fn add_pair(&mut self, pair: &CorrelatedSignal<'_>) {
        self.trade_count += 1;
        if pair.trade.is_purchase() {
            self.buy_count += 1;
        }
        let days = pair.abs_offset();
        self.nearest_days = Some(self.nearest_days.map_or(days, |nearest| nearest.min(days)));
    }
}

pub struct SignalAggregator {
    scorer: SignalScorer,
}

impl SignalAggregator {
    pub fn new() -> Self {
        Self {
            scorer: SignalScorer::new(),
        }
    }

    /// Group pairs by (ticker, sector) and rank the groups
    ///
    /// Ranking is buys desc, then trades desc, then nearest bill action asc.
    /// Groups that tie on all three keep (ticker, sector) order.
    pub fn rank(&self, pairs: &[CorrelatedSignal<'_>]) -> Vec<TickerMetrics> {
        let mut groups: BTreeMap<(&str, &str), TickerMetrics> = BTreeMap::new();
        for pair in pairs {
            groups
                .entry((pair.trade.ticker.as_str(), pair.sector))
                .or_insert_with(|| {
                    TickerMetrics::new(pair.trade.ticker.clone(), pair.sector.to_string())
                })
                .add_pair(pair);
        }

        let mut ranked: Vec<TickerMetrics> = groups.into_values().collect();
        ranked.sort_by(|a, b| {
            b.buy_count
                .cmp(&a.buy_count)
                .then_with(|| b.trade_count.cmp(&a.trade_count))
                .then_with(|| a.nearest_days.cmp(&b.nearest_days))
        });
        ranked
    }

    /// Score and truncate the ranked groups
    pub fn strongest(&self, pairs: &[CorrelatedSignal<'_>], limit: usize) -> Vec<TickerSignal> {
        self.rank(pairs)
            .into_iter()
            .take(limit)
            .map(|metrics| self.score(&metrics))
            .collect()
    }

    pub fn score(&self, metrics: &TickerMetrics) -> TickerSignal {
        TickerSignal {
            ticker: metrics.ticker.clone(),
            sector: metrics.sector.clone(),
            signal_strength: self
                .scorer
                .signal_strength(metrics.trade_count, metrics.buy_count),
            rationale: self.scorer.rationale(
                metrics.trade_count,
                metrics.buy_count,
                metrics.nearest_days,
            ),
        }
    }
}

impl Default for SignalAggregator {
    fn default() -> Self {
        Self::new()
    }
}
