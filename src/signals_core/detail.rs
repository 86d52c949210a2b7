//! Correlated trades for a single ticker

use super::correlator::CorrelatedSignal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDetail {
    pub official: String,
    pub ticker: String,
    pub trade_date: String,
    pub transaction_type: String,
    pub bill_title: Option<String>,
    pub status: Option<String>,
    pub status_date: String,
    pub day_offset: Option<i64>,
}

impl From<&CorrelatedSignal<'_>> for TradeDetail {
    fn from(pair: &CorrelatedSignal<'_>) -> Self {
        Self {
            official: pair.trade.official.clone(),
            ticker: pair.trade.ticker.clone(),
            trade_date: pair.trade_date.to_string(),
            transaction_type: pair.trade.transaction_type.clone(),
            bill_title: pair.event.bill_title.clone(),
            status: pair.event.status.clone(),
            status_date: pair.status_date.to_string(),
            day_offset: Some(pair.day_offset),
        }
    }
}

/// Ticker symbols are matched upper-cased, surrounding whitespace ignored
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

pub fn ticker_matches(candidate: &str, normalized: &str) -> bool {
    normalize_ticker(candidate) == normalized
}

pub struct DetailLookup;

impl DetailLookup {
    pub fn new() -> Self {
        Self
    }

    /// Rows for `ticker`, at most `limit`
    ///
    /// `pairs` must already be in canonical order, as returned by
    /// [`CorrelationEngine`](super::CorrelationEngine); filtering keeps it.
    pub fn lookup(
        &self,
        pairs: &[CorrelatedSignal<'_>],
        ticker: &str,
        limit: usize,
    ) -> Vec<TradeDetail> {
        let normalized = normalize_ticker(ticker);

        pairs
            .iter()
            .filter(|pair| ticker_matches(&pair.trade.ticker, &normalized))
            .take(limit)
            .map(TradeDetail::from)
            .collect()
    }
}

impl Default for DetailLookup {
    fn default() -> Self {
        Self::new()
    }
}
