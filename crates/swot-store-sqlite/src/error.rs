//! Error type for `swot-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

/// Errors arising from the SQLite store.
#[derive(Debug, Error)]
pub enum Error {
  /// The underlying connection or query failed.
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored blob failed to encode or decode.
  #[error("stored value is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),

  /// A record with this id is already in the stored list.
  #[error("duplicate study record id: {0}")]
  DuplicateRecord(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
