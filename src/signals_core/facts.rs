//! Base facts loaded from the fact store
//!
//! Rows are denormalized at load time: a trade carries its official's name and
//! its company's ticker/sector, a status event carries its bill's id, title and
//! sector. Nothing here is ever mutated after loading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transaction-type prefix counted as a buy (ASCII case-insensitive, like SQL `LIKE`)
const PURCHASE_PREFIX: &str = "Purchase";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDisclosure {
    pub id: i64,
    pub official: String,
    pub ticker: String,
    pub company_sector: Option<String>,
    pub trade_date: Option<NaiveDate>,
    pub transaction_type: String,
    pub amount_low: Option<f64>,
    pub amount_high: Option<f64>,
}

impl TradeDisclosure {
    /// Check if the transaction-type label marks a purchase ("Purchase", "Purchase (partial)", ...)
    pub fn is_purchase(&self) -> bool {
        self.transaction_type
            .get(..PURCHASE_PREFIX.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(PURCHASE_PREFIX))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillStatusEvent {
    pub id: i64,
    pub external_bill_id: String,
    pub bill_title: Option<String>,
    pub bill_sector: Option<String>,
    pub status: Option<String>,
    pub status_date: Option<NaiveDate>,
}

/// Everything the correlation view needs for one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactSet {
    pub trades: Vec<TradeDisclosure>,
    pub status_events: Vec<BillStatusEvent>,
}

impl FactSet {
    pub fn new(trades: Vec<TradeDisclosure>, status_events: Vec<BillStatusEvent>) -> Self {
        Self {
            trades,
            status_events,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty() && self.status_events.is_empty()
    }
}

/// Parse an ISO date as stored by the ingestion side.
///
/// Only the leading `YYYY-MM-DD` is read, so `2024-01-10T09:30:00` parses to
/// the same day. Anything else is treated as a missing date.
pub fn parse_fact_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_trade(transaction_type: &str) -> TradeDisclosure {
        TradeDisclosure {
            id: 1,
            official: "Jane Doe".to_string(),
            ticker: "NVDA".to_string(),
            company_sector: Some("Technology".to_string()),
            trade_date: parse_fact_date("2024-01-10"),
            transaction_type: transaction_type.to_string(),
            amount_low: Some(1001.0),
            amount_high: Some(15000.0),
        }
    }

    #[test]
    fn test_purchase_prefix() {
        assert!(create_test_trade("Purchase").is_purchase());
        assert!(create_test_trade("Purchase (partial)").is_purchase());
        assert!(create_test_trade("purchase").is_purchase());
        assert!(!create_test_trade("Sale (Full)").is_purchase());
        assert!(!create_test_trade("Exchange").is_purchase());
        assert!(!create_test_trade("").is_purchase());
    }

    #[test]
    fn test_parse_fact_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10);
        assert_eq!(parse_fact_date("2024-01-10"), expected);
        assert_eq!(parse_fact_date(" 2024-01-10 "), expected);
        assert_eq!(parse_fact_date("2024-01-10T09:30:00"), expected);
        assert_eq!(parse_fact_date("2024-01-10 09:30:00"), expected);
    }

    #[test]
    fn test_unparseable_dates_are_missing() {
        assert_eq!(parse_fact_date(""), None);
        assert_eq!(parse_fact_date("01/10/2024"), None);
        assert_eq!(parse_fact_date("2024-13-40"), None);
        assert_eq!(parse_fact_date("n/a"), None);
    }

    #[test]
    fn test_empty_fact_set() {
        assert!(FactSet::default().is_empty());
        let facts = FactSet::new(vec![create_test_trade("Purchase")], vec![]);
        assert!(!facts.is_empty());
    }
}
