//! Capitol Signals
//!
//! Correlates trade disclosures by public officials with bill status changes
//! in the same sector and answers two tool calls over the result:
//!
//! - `top_signals` ranks tickers whose trades cluster around legislative action
//! - `ticker_details` lists the correlated trades behind one ticker
//!
//! Both calls recompute from the fact store on every invocation and fall back
//! to fixed sample data when the store is missing, broken, or has nothing to
//! correlate.

pub mod agent;
pub mod config;
pub mod signals_core;
pub mod sqlite_pragma;
pub mod store;
pub mod tools;

pub use agent::{SignalsAgent, SignalsResponse, TradesResponse};
pub use config::{ConfigError, SignalsConfig};
pub use store::{FactSource, SqliteFactSource, StoreError};
pub use tools::{ToolError, ToolRegistry};
