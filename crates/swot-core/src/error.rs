//! Error types for `swot-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("the timer is already running")]
  TimerRunning,

  #[error("the timer is not running")]
  TimerNotRunning,

  #[error("the selection cannot change while the timer is running")]
  SelectionLocked,

  #[error("unknown study type: {0:?}")]
  UnknownStudyType(String),

  #[error("unknown subject: {0:?}")]
  UnknownSubject(String),

  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("phone number must be exactly 10 digits")]
  InvalidPhone,

  #[error("that does not look like an email address")]
  InvalidEmail,

  #[error("password must be at least 6 characters")]
  PasswordTooShort,

  #[error("username must be 3-20 characters of a-z, 0-9 or _")]
  InvalidUsername,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
