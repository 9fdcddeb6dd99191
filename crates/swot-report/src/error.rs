//! Error type for `swot-report`.

use thiserror::Error;

/// Errors arising from report generation.
#[derive(Debug, Error)]
pub enum Error {
  /// There is nothing to report on; an empty table is never produced.
  #[error("no study records to report on")]
  NoRecords,

  /// The PDF backend rejected the document.
  #[error("pdf rendering failed: {0}")]
  Pdf(String),

  /// The output file could not be written.
  #[error("could not write report file: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
