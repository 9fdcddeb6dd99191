//! Wire types for the GoTrue and PostgREST surfaces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Auth ────────────────────────────────────────────────────────────────────

/// A signed-in GoTrue session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
  pub access_token: String,
  pub user:         AuthUser,
}

/// The GoTrue user attached to a session.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
  pub id: Uuid,
  #[serde(default)]
  pub email: Option<String>,
}

/// What `/auth/v1/signup` produced: a live session when the deployment has
/// email confirmation disabled, otherwise a user pending verification.
#[derive(Debug, Clone)]
pub enum SignupOutcome {
  SignedIn(Session),
  Pending(AuthUser),
}

// ─── Users table ─────────────────────────────────────────────────────────────

/// How a `users` row is addressed: by access key or by auth-provider id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKey {
  AccessKey(String),
  AuthUser(Uuid),
}

impl UserKey {
  /// PostgREST filter for this key, as a query parameter pair.
  pub(crate) fn query_param(&self) -> (&'static str, String) {
    match self {
      UserKey::AccessKey(key) => ("access_key", format!("eq.{key}")),
      UserKey::AuthUser(id) => ("auth_user_id", format!("eq.{id}")),
    }
  }
}

/// Payload for creating a `users` row at signup.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
  pub name:  String,
  pub class: String,
  pub state: String,
  pub city:  String,
  pub phone: String,
  pub email: String,
  pub access_key: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub auth_user_id: Option<Uuid>,
  pub total_study_time: u64,
}

/// One row of the hosted `users` table, as this client reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
  pub id:    Uuid,
  pub name:  Option<String>,
  pub class: Option<String>,
  pub state: Option<String>,
  pub city:  Option<String>,
  pub phone: Option<String>,
  pub email: Option<String>,
  pub access_key: Option<String>,
  pub username:   Option<String>,
  /// Absent until the first sync writes it.
  pub total_study_time: Option<u64>,
  pub updated_at: Option<DateTime<Utc>>,
}

/// Profile fields changeable from settings. `None` fields are left
/// untouched on the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub class: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone: Option<String>,
}

impl ProfileUpdate {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.class.is_none()
      && self.state.is_none()
      && self.city.is_none()
      && self.phone.is_none()
  }
}

// ─── Leaderboard ─────────────────────────────────────────────────────────────

/// One leaderboard row; only users with a username set appear.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderboardEntry {
  pub username: String,
  #[serde(default)]
  pub total_study_time: u64,
}

// ─── Feedback ────────────────────────────────────────────────────────────────

/// A feedback submission. Construction validates rating bounds and message
/// length so no malformed row ever reaches the wire; the identity fields
/// are filled from the local profile when one exists.
#[derive(Debug, Clone, Serialize)]
pub struct NewFeedback {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_id: Option<Uuid>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
  #[serde(rename = "feedback_text")]
  pub message: String,
  pub rating: u8,
}

impl NewFeedback {
  pub fn new(
    name:    Option<String>,
    email:   Option<String>,
    rating:  u8,
    message: String,
  ) -> Result<Self> {
    if !(1..=5).contains(&rating) {
      return Err(Error::InvalidFeedback("rating must be between 1 and 5"));
    }
    if message.trim().is_empty() {
      return Err(Error::InvalidFeedback("message must not be empty"));
    }
    if message.chars().count() > 1000 {
      return Err(Error::InvalidFeedback(
        "message must be at most 1000 characters",
      ));
    }
    Ok(Self {
      user_id: None,
      username: None,
      name,
      email,
      phone: None,
      state: None,
      city: None,
      message,
      rating,
    })
  }
}

// ─── Sync ────────────────────────────────────────────────────────────────────

/// Result of one sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
  /// `max(local, remote)` at the time of the sync.
  pub final_total: u64,
  /// Whether the remote row was behind and got updated.
  pub pushed: bool,
}
