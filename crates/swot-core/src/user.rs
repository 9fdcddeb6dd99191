//! User profile data, input validation, and access-key derivation.
//!
//! Validation runs before any write — a rejected form never touches the
//! store or the network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Profile ─────────────────────────────────────────────────────────────────

/// Locally owned profile mirror.
///
/// The remote `users` row is independently keyed and reconciled only for
/// the aggregate study total, never for these fields wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserData {
  pub name:  String,
  pub class: String,
  pub state: String,
  pub city:  String,
  pub phone: String,
  pub email: String,

  #[serde(default)]
  pub is_verified: bool,

  /// Opaque credential identifying this user's backend row.
  #[serde(default)]
  pub key: Option<String>,

  /// Leaderboard name; present once claimed.
  #[serde(default)]
  pub username: Option<String>,

  /// Auth-provider user id; present once signed in.
  #[serde(default)]
  pub auth_user_id: Option<Uuid>,
}

// ─── Form validation ─────────────────────────────────────────────────────────

/// Check a signup/profile form: every identity field present, a 10-digit
/// phone number, a plausible email address.
pub fn validate_profile(profile: &UserData) -> Result<()> {
  for (value, field) in [
    (&profile.name, "name"),
    (&profile.class, "class"),
    (&profile.state, "state"),
    (&profile.city, "city"),
    (&profile.phone, "phone"),
    (&profile.email, "email"),
  ] {
    if value.trim().is_empty() {
      return Err(Error::MissingField(field));
    }
  }
  if !valid_phone(&profile.phone) {
    return Err(Error::InvalidPhone);
  }
  if !valid_email(&profile.email) {
    return Err(Error::InvalidEmail);
  }
  Ok(())
}

pub fn valid_phone(phone: &str) -> bool {
  phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

pub fn valid_email(email: &str) -> bool {
  if email.is_empty() || email.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  // One '@', a dotted domain, nothing empty around the separators.
  !local.is_empty()
    && !domain.contains('@')
    && domain.contains('.')
    && domain.split('.').all(|part| !part.is_empty())
}

pub fn validate_password(password: &str) -> Result<()> {
  if password.len() < 6 {
    return Err(Error::PasswordTooShort);
  }
  Ok(())
}

// ─── Usernames ───────────────────────────────────────────────────────────────

/// Strip everything outside `[A-Za-z0-9_]`, then lowercase.
pub fn sanitize_username(raw: &str) -> String {
  raw
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
    .collect::<String>()
    .to_lowercase()
}

/// A sanitized username must be 3-20 characters of `[a-z0-9_]`.
pub fn validate_username(username: &str) -> Result<()> {
  let shape_ok = (3..=20).contains(&username.len())
    && username
      .chars()
      .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
  if shape_ok { Ok(()) } else { Err(Error::InvalidUsername) }
}

// ─── Access keys ─────────────────────────────────────────────────────────────

/// Derive a fresh access key from the current instant and caller-supplied
/// entropy: `SWOT-{base36 millis}-{base36 entropy}`, uppercased.
///
/// Pure given its inputs; the caller owns the entropy source.
pub fn generate_access_key(now: DateTime<Utc>, entropy: u64) -> String {
  let millis = now.timestamp_millis().max(0) as u64;
  let mut tail = to_base36(entropy);
  tail.truncate(8);
  format!("SWOT-{}-{}", to_base36(millis), tail).to_uppercase()
}

fn to_base36(mut value: u64) -> String {
  const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
  if value == 0 {
    return "0".into();
  }
  let mut out = String::new();
  while value > 0 {
    out.insert(0, DIGITS[(value % 36) as usize] as char);
    value /= 36;
  }
  out
}
