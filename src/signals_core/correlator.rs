//! Sector-keyed interval join between trade disclosures and bill status events

use super::facts::{BillStatusEvent, FactSet, TradeDisclosure};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Trades within this many days of a status event (either side, inclusive) correlate
pub const DEFAULT_WINDOW_DAYS: u32 = 5;

/// A (trade, status event) pair that satisfies the matching rule
#[derive(Debug, Clone, Copy)]
pub struct CorrelatedSignal<'a> {
    pub trade: &'a TradeDisclosure,
    pub event: &'a BillStatusEvent,
    pub sector: &'a str,
    pub trade_date: NaiveDate,
    pub status_date: NaiveDate,
    /// `trade_date - status_date` in days
    pub day_offset: i64,
}

impl CorrelatedSignal<'_> {
    pub fn abs_offset(&self) -> i64 {
        self.day_offset.abs()
    }
}

/// Canonical view order: nearest bill action first, most recent trade on ties
pub fn canonical_order(a: &CorrelatedSignal<'_>, b: &CorrelatedSignal<'_>) -> Ordering {
    a.abs_offset()
        .cmp(&b.abs_offset())
        .then_with(|| b.trade_date.cmp(&a.trade_date))
}

pub struct CorrelationEngine {
    window_days: u32,
}

impl CorrelationEngine {
    pub fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Produce every correlated pair in the fact set, in canonical order
    pub fn correlate<'a>(&self, facts: &'a FactSet) -> Vec<CorrelatedSignal<'a>> {
        self.correlate_trades(facts, |_| true)
    }

    /// Same join restricted to trades accepted by `keep`
    ///
    /// Status events are indexed by sector, then by date, so each trade only
    /// scans the ±window slice of its own sector. Rows missing a sector or a
    /// date never enter the index or the scan. No deduplication: a trade
    /// pairs with every status event in the window, across every bill of its
    /// sector.
    pub fn correlate_trades<'a, F>(&self, facts: &'a FactSet, keep: F) -> Vec<CorrelatedSignal<'a>>
    where
        F: Fn(&TradeDisclosure) -> bool,
    {
        let mut index: HashMap<&str, BTreeMap<NaiveDate, Vec<&BillStatusEvent>>> = HashMap::new();
        for event in &facts.status_events {
            let (Some(sector), Some(status_date)) =
                (event.bill_sector.as_deref(), event.status_date)
            else {
                continue;
            };
            index
                .entry(sector)
                .or_default()
                .entry(status_date)
                .or_default()
                .push(event);
        }

        let window = Days::new(u64::from(self.window_days));
        let mut pairs = Vec::new();

        for trade in facts.trades.iter().filter(|t| keep(t)) {
            let (Some(sector), Some(trade_date)) =
                (trade.company_sector.as_deref(), trade.trade_date)
            else {
                continue;
            };
            let Some(by_date) = index.get(sector) else {
                continue;
            };

            let range_start = trade_date.checked_sub_days(window).unwrap_or(NaiveDate::MIN);
            let range_end = trade_date.checked_add_days(window).unwrap_or(NaiveDate::MAX);

            for (&status_date, events) in by_date.range(range_start..=range_end) {
                let day_offset = trade_date.signed_duration_since(status_date).num_days();
                for &event in events {
                    pairs.push(CorrelatedSignal {
                        trade,
                        event,
                        sector,
                        trade_date,
                        status_date,
                        day_offset,
                    });
                }
            }
        }

        pairs.sort_by(canonical_order);
        pairs
    }
}

/// Flat, owned projection of a correlated pair for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRow {
    pub trade_id: i64,
    pub official: String,
    pub ticker: String,
    pub sector: String,
    pub trade_date: String,
    pub transaction_type: String,
    pub amount_low: Option<f64>,
    pub amount_high: Option<f64>,
    pub external_bill_id: String,
    pub bill_title: Option<String>,
    pub status: Option<String>,
    pub status_date: String,
    pub day_offset: i64,
}

impl From<&CorrelatedSignal<'_>> for CorrelationRow {
    fn from(pair: &CorrelatedSignal<'_>) -> Self {
        Self {
            trade_id: pair.trade.id,
            official: pair.trade.official.clone(),
            ticker: pair.trade.ticker.clone(),
            sector: pair.sector.to_string(),
            trade_date: pair.trade_date.to_string(),
            transaction_type: pair.trade.transaction_type.clone(),
            amount_low: pair.trade.amount_low,
            amount_high: pair.trade.amount_high,
            external_bill_id: pair.event.external_bill_id.clone(),
            bill_title: pair.event.bill_title.clone(),
            status: pair.event.status.clone(),
            status_date: pair.status_date.to_string(),
            day_offset: pair.day_offset,
        }
    }
}
