//! Signals Core - Trade / Legislative Action Correlation Engine
//!
//! Correlates disclosed trades with bill status changes in the same sector and
//! ranks tickers whose trading clusters around legislative events.
//!
//! # Architecture
//!
//! ```text
//! FactSet (trades + bill status events)
//!     ↓
//! CorrelationEngine (sector + ±5 day interval join)
//!     ↓
//! ├── SignalAggregator (group by ticker/sector, rank, SignalScorer)
//! └── DetailLookup (single ticker, nearest action first)
//!     ↓
//! FallbackData when nothing correlates
//! ```

pub mod aggregator;
pub mod correlator;
pub mod detail;
pub mod facts;
pub mod fallback;
pub mod scorer;

pub use aggregator::{SignalAggregator, TickerMetrics, TickerSignal};
pub use correlator::{CorrelatedSignal, CorrelationEngine, CorrelationRow, DEFAULT_WINDOW_DAYS};
pub use detail::{normalize_ticker, ticker_matches, DetailLookup, TradeDetail};
pub use facts::{parse_fact_date, BillStatusEvent, FactSet, TradeDisclosure};
pub use fallback::FallbackData;
pub use scorer::SignalScorer;
