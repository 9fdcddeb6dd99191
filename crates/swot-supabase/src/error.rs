//! Error type for `swot-supabase`.

use thiserror::Error;

/// Errors arising from backend calls.
///
/// Every failure is local to one user action; callers report it once and
/// abandon the operation, never retry automatically.
#[derive(Debug, Error)]
pub enum Error {
  /// Transport-level failure (connect, timeout, body read).
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// A response body that did not match the expected shape.
  #[error("unexpected response body: {0}")]
  Json(#[from] serde_json::Error),

  /// The auth provider rejected a credential operation.
  #[error("authentication failed: {0}")]
  Auth(String),

  /// Any other non-success response.
  #[error("{path} → {status}: {body}")]
  Status {
    path:   &'static str,
    status: u16,
    body:   String,
  },

  /// A sync pass is already in progress on this client.
  #[error("a sync is already in progress")]
  SyncInFlight,

  /// Feedback rejected before any request was sent.
  #[error("invalid feedback: {0}")]
  InvalidFeedback(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
