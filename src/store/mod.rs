//! Fact store access
//!
//! The reader side ([`SqliteFactSource`]) opens the database read-only once per
//! query and releases it before returning. The writer side ([`FactWriter`],
//! [`ingest_file`]) is the ingestion collaborator: get-or-create on natural
//! keys, append-only everywhere else.

pub mod ingest;
pub mod schema;
pub mod sqlite_reader;
pub mod sqlite_writer;

use crate::signals_core::FactSet;
use std::path::PathBuf;
use thiserror::Error;

pub use ingest::{ingest_document, ingest_file, IngestDocument, IngestError, IngestReport};
pub use schema::{apply_schema, SCHEMA_SQL};
pub use sqlite_reader::SqliteFactSource;
pub use sqlite_writer::{FactWriter, NewBill, NewBillStatus, NewCompany, NewTrade};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("fact store not found at {0}")]
    Unavailable(PathBuf),
    #[error("failed to open fact store: {0}")]
    Open(#[source] rusqlite::Error),
    #[error("fact store query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl StoreError {
    /// True when the store could not be reached at all (as opposed to a failing query)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Open(_))
    }
}

/// Anything that can produce the base facts for one query
pub trait FactSource {
    fn load(&self) -> Result<FactSet, StoreError>;

    /// Short label for logging
    fn describe(&self) -> String {
        "in-memory facts".to_string()
    }
}

impl FactSource for FactSet {
    fn load(&self) -> Result<FactSet, StoreError> {
        Ok(self.clone())
    }
}
