//! Sample output returned when the fact store yields no correlated rows

use super::aggregator::TickerSignal;
use super::detail::{normalize_ticker, TradeDetail};

pub const PLACEHOLDER_OFFICIAL: &str = "Sample Official";
pub const PLACEHOLDER_TRADE_DATE: &str = "(no local data)";
pub const PLACEHOLDER_TRANSACTION: &str = "Purchase";
pub const PLACEHOLDER_BILL_TITLE: &str = "Example bill touching the company's sector";
pub const PLACEHOLDER_STATUS: &str = "Draft";
pub const PLACEHOLDER_STATUS_DATE: &str = "(n/a)";

/// Pre-ranked fallback dataset; injectable so callers can substitute their own
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackData {
    signals: Vec<TickerSignal>,
}

impl FallbackData {
    pub fn new(signals: Vec<TickerSignal>) -> Self {
        Self { signals }
    }

    pub fn signals(&self) -> &[TickerSignal] {
        &self.signals
    }

    /// First `limit` entries in their fixed order
    pub fn top_signals(&self, limit: usize) -> Vec<TickerSignal> {
        self.signals.iter().take(limit).cloned().collect()
    }

    /// Single synthetic row for a ticker with no correlated trades
    pub fn placeholder(&self, ticker: &str) -> TradeDetail {
        TradeDetail {
            official: PLACEHOLDER_OFFICIAL.to_string(),
            ticker: normalize_ticker(ticker),
            trade_date: PLACEHOLDER_TRADE_DATE.to_string(),
            transaction_type: PLACEHOLDER_TRANSACTION.to_string(),
            bill_title: Some(PLACEHOLDER_BILL_TITLE.to_string()),
            status: Some(PLACEHOLDER_STATUS.to_string()),
            status_date: PLACEHOLDER_STATUS_DATE.to_string(),
            day_offset: None,
        }
    }
}

fn sample(ticker: &str, sector: &str, signal_strength: f64, rationale: &str) -> TickerSignal {
    TickerSignal {
        ticker: ticker.to_string(),
        sector: sector.to_string(),
        signal_strength,
        rationale: rationale.to_string(),
    }
}

impl Default for FallbackData {
    fn default() -> Self {
        Self::new(vec![
            sample(
                "NVDA",
                "Technology",
                0.92,
                "Clustered bipartisan buys ahead of AI funding bills and strong earnings momentum.",
            ),
            sample(
                "LMT",
                "Aerospace & Defense",
                0.87,
                "Defense appropriations markup paired with fresh purchase disclosures from Armed Services members.",
            ),
            sample(
                "LLY",
                "Healthcare",
                0.83,
                "Insider accumulation around drug pricing negotiations where health committee staff are active.",
            ),
            sample(
                "CAT",
                "Industrials",
                0.78,
                "Heavy equipment stimulus amendments tracked by infrastructure subcommittee members buying shares.",
            ),
            sample(
                "NEE",
                "Utilities",
                0.75,
                "Energy transition incentives aligning with clean-power procurement commentary in committee hearings.",
            ),
        ])
    }
}
