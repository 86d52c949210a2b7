//! Query facade behind the two capabilities
//!
//! Every call loads the facts afresh, recomputes the correlation view, and
//! never fails: an unreachable store, a failing query, and an empty result all
//! resolve to the fallback data. The three cases are only distinguished in the
//! logs.

use crate::config::SignalsConfig;
use crate::signals_core::{
    normalize_ticker, ticker_matches, CorrelationEngine, CorrelationRow, DetailLookup, FactSet,
    FallbackData, SignalAggregator, TickerSignal, TradeDetail,
};
use crate::store::{FactSource, SqliteFactSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalsResponse {
    pub signals: Vec<TickerSignal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradesResponse {
    pub trades: Vec<TradeDetail>,
}

pub struct SignalsAgent {
    source: Box<dyn FactSource>,
    engine: CorrelationEngine,
    aggregator: SignalAggregator,
    lookup: DetailLookup,
    fallback: FallbackData,
}

impl SignalsAgent {
    pub fn new(source: impl FactSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            engine: CorrelationEngine::with_defaults(),
            aggregator: SignalAggregator::new(),
            lookup: DetailLookup::new(),
            fallback: FallbackData::default(),
        }
    }

    /// Agent over the SQLite store named in the config
    pub fn from_config(config: &SignalsConfig) -> Self {
        Self::new(SqliteFactSource::new(&config.db_path)).with_window_days(config.window_days)
    }

    pub fn with_fallback(mut self, fallback: FallbackData) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.engine = CorrelationEngine::new(window_days);
        self
    }

    pub fn fallback(&self) -> &FallbackData {
        &self.fallback
    }

    /// Facts for one query, or None when the store could not be read
    fn load_facts(&self) -> Option<FactSet> {
        match self.source.load() {
            Ok(facts) => Some(facts),
            Err(err) if err.is_unavailable() => {
                log::warn!("⚠️  Fact store unavailable ({}): {}", self.source.describe(), err);
                None
            }
            Err(err) => {
                log::warn!("⚠️  Fact store query failed ({}): {}", self.source.describe(), err);
                None
            }
        }
    }

    /// Strongest-looking tickers, at most `limit`
    pub fn top_signals(&self, limit: usize) -> SignalsResponse {
        let signals = self
            .load_facts()
            .map(|facts| {
                let pairs = self.engine.correlate(&facts);
                self.aggregator.strongest(&pairs, limit)
            })
            .unwrap_or_default();

        if !signals.is_empty() {
            return SignalsResponse { signals };
        }

        log::debug!(
            "No correlated trades; returning {} fallback signals",
            limit.min(self.fallback.signals().len())
        );
        SignalsResponse {
            signals: self.fallback.top_signals(limit),
        }
    }

    /// Correlated trades for one ticker, nearest bill action first, at most `limit`
    pub fn ticker_details(&self, ticker: &str, limit: usize) -> TradesResponse {
        let normalized = normalize_ticker(ticker);
        let trades = self
            .load_facts()
            .map(|facts| {
                let pairs = self
                    .engine
                    .correlate_trades(&facts, |trade| ticker_matches(&trade.ticker, &normalized));
                self.lookup.lookup(&pairs, &normalized, limit)
            })
            .unwrap_or_default();

        if !trades.is_empty() {
            return TradesResponse { trades };
        }

        log::debug!("No correlated trades for {}; returning placeholder row", ticker);
        TradesResponse {
            trades: vec![self.fallback.placeholder(ticker)],
        }
    }

    /// Raw correlation view in canonical order; empty when the store is unreadable
    pub fn correlations(&self, limit: usize) -> Vec<CorrelationRow> {
        let Some(facts) = self.load_facts() else {
            return Vec::new();
        };
        self.engine
            .correlate(&facts)
            .iter()
            .take(limit)
            .map(CorrelationRow::from)
            .collect()
    }
}
