//! Async HTTP client for the hosted backend.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::json;

use crate::{
  types::{
    LeaderboardEntry, NewFeedback, NewUser, ProfileUpdate, RemoteUser,
    Session, SignupOutcome, SyncOutcome, UserKey,
  },
  Error, Result,
};

/// Connection settings for one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
  pub base_url: String,
  pub anon_key: String,
}

/// Async client over the project's GoTrue and PostgREST endpoints.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based, and
/// clones share the sync gate, so single-flight holds across them.
#[derive(Clone)]
pub struct SupabaseClient {
  client:    Client,
  config:    SupabaseConfig,
  sync_gate: Arc<tokio::sync::Mutex<()>>,
}

impl SupabaseClient {
  pub fn new(config: SupabaseConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      client,
      config,
      sync_gate: Arc::new(tokio::sync::Mutex::new(())),
    })
  }

  fn auth_url(&self, path: &str) -> String {
    format!("{}/auth/v1{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn rest_url(&self, path: &str) -> String {
    format!("{}/rest/v1{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Attach the project api key. Anonymous bearer unless a call overrides
  /// it with a user token.
  fn apply(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    req
      .header("apikey", &self.config.anon_key)
      .bearer_auth(&self.config.anon_key)
  }

  async fn check(
    resp: reqwest::Response,
    path: &'static str,
  ) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Status { path, status: status.as_u16(), body })
  }

  /// Like [`Self::check`] but maps failures to [`Error::Auth`] using the
  /// message GoTrue puts in the body.
  async fn check_auth(
    resp: reqwest::Response,
    path: &'static str,
  ) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    match auth_message(&body) {
      Some(message) => Err(Error::Auth(message)),
      None => Err(Error::Status { path, status: status.as_u16(), body }),
    }
  }

  // ── Auth ──────────────────────────────────────────────────────────────────

  /// `POST /auth/v1/token?grant_type=password`
  pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
    let resp = self
      .apply(self.client.post(self.auth_url("/token")))
      .query(&[("grant_type", "password")])
      .json(&json!({ "email": email, "password": password }))
      .send()
      .await?;

    let resp = Self::check_auth(resp, "POST /auth/v1/token").await?;
    Ok(resp.json().await?)
  }

  /// `POST /auth/v1/signup`
  pub async fn sign_up(
    &self,
    email:    &str,
    password: &str,
  ) -> Result<SignupOutcome> {
    let resp = self
      .apply(self.client.post(self.auth_url("/signup")))
      .json(&json!({ "email": email, "password": password }))
      .send()
      .await?;

    let resp = Self::check_auth(resp, "POST /auth/v1/signup").await?;

    // With confirmation disabled the body is a full session; otherwise it
    // is the bare user record awaiting verification.
    let value: serde_json::Value = resp.json().await?;
    if value.get("access_token").is_some() {
      Ok(SignupOutcome::SignedIn(serde_json::from_value(value)?))
    } else {
      Ok(SignupOutcome::Pending(serde_json::from_value(value)?))
    }
  }

  /// `PUT /auth/v1/user` — change the signed-in user's password.
  pub async fn update_password(
    &self,
    access_token: &str,
    new_password: &str,
  ) -> Result<()> {
    let resp = self
      .client
      .put(self.auth_url("/user"))
      .header("apikey", &self.config.anon_key)
      .bearer_auth(access_token)
      .json(&json!({ "password": new_password }))
      .send()
      .await?;

    Self::check_auth(resp, "PUT /auth/v1/user").await?;
    Ok(())
  }

  // ── Users table ───────────────────────────────────────────────────────────

  /// `POST /rest/v1/users`
  pub async fn create_user_row(&self, user: &NewUser) -> Result<()> {
    let resp = self
      .apply(self.client.post(self.rest_url("/users")))
      .header("Prefer", "return=minimal")
      .json(user)
      .send()
      .await?;

    Self::check(resp, "POST /rest/v1/users").await?;
    Ok(())
  }

  /// `GET /rest/v1/users?<key>=eq.<value>`
  pub async fn get_user(&self, key: &UserKey) -> Result<Option<RemoteUser>> {
    let resp = self
      .apply(self.client.get(self.rest_url("/users")))
      .query(&[key.query_param()])
      .send()
      .await?;

    let resp = Self::check(resp, "GET /rest/v1/users").await?;
    let rows: Vec<RemoteUser> = resp.json().await?;
    Ok(rows.into_iter().next())
  }

  /// Read the remote `total_study_time`, if the row carries one.
  pub async fn fetch_total(&self, key: &UserKey) -> Result<Option<u64>> {
    let user = self.get_user(key).await?;
    Ok(user.and_then(|row| row.total_study_time))
  }

  /// `PATCH /rest/v1/users?<key>` — write a new total plus `updated_at`.
  pub async fn update_total(
    &self,
    key:        &UserKey,
    total:      u64,
    updated_at: DateTime<Utc>,
  ) -> Result<()> {
    let resp = self
      .apply(self.client.patch(self.rest_url("/users")))
      .query(&[key.query_param()])
      .header("Prefer", "return=minimal")
      .json(&json!({
        "total_study_time": total,
        "updated_at": updated_at.to_rfc3339(),
      }))
      .send()
      .await?;

    Self::check(resp, "PATCH /rest/v1/users").await?;
    Ok(())
  }

  /// `PATCH /rest/v1/users?<key>` — claim or change the leaderboard name.
  pub async fn update_username(
    &self,
    key:      &UserKey,
    username: &str,
  ) -> Result<()> {
    let resp = self
      .apply(self.client.patch(self.rest_url("/users")))
      .query(&[key.query_param()])
      .header("Prefer", "return=minimal")
      .json(&json!({ "username": username }))
      .send()
      .await?;

    Self::check(resp, "PATCH /rest/v1/users").await?;
    Ok(())
  }

  /// `PATCH /rest/v1/users?<key>` — update changed profile fields.
  pub async fn update_profile(
    &self,
    key:    &UserKey,
    update: &ProfileUpdate,
  ) -> Result<()> {
    if update.is_empty() {
      return Ok(());
    }

    let resp = self
      .apply(self.client.patch(self.rest_url("/users")))
      .query(&[key.query_param()])
      .header("Prefer", "return=minimal")
      .json(update)
      .send()
      .await?;

    Self::check(resp, "PATCH /rest/v1/users").await?;
    Ok(())
  }

  /// `GET /rest/v1/users?username=eq.<name>` — availability probe.
  pub async fn username_taken(&self, username: &str) -> Result<bool> {
    let resp = self
      .apply(self.client.get(self.rest_url("/users")))
      .query(&[
        ("username", format!("eq.{username}")),
        ("select", "username".to_owned()),
      ])
      .send()
      .await?;

    let resp = Self::check(resp, "GET /rest/v1/users").await?;
    let rows: Vec<serde_json::Value> = resp.json().await?;
    Ok(!rows.is_empty())
  }

  // ── Leaderboard ───────────────────────────────────────────────────────────

  /// Top users by total study time; opted-in (named) users only.
  pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
    let resp = self
      .apply(self.client.get(self.rest_url("/users")))
      .query(&[
        ("select", "username,total_study_time"),
        ("username", "not.is.null"),
        ("order", "total_study_time.desc"),
        ("limit", "50"),
      ])
      .send()
      .await?;

    let resp = Self::check(resp, "GET /rest/v1/users").await?;
    Ok(resp.json().await?)
  }

  // ── Feedback ──────────────────────────────────────────────────────────────

  /// `POST /rest/v1/feedback`
  pub async fn submit_feedback(&self, feedback: &NewFeedback) -> Result<()> {
    let resp = self
      .apply(self.client.post(self.rest_url("/feedback")))
      .header("Prefer", "return=minimal")
      .json(feedback)
      .send()
      .await?;

    Self::check(resp, "POST /rest/v1/feedback").await?;
    Ok(())
  }

  // ── Sync ──────────────────────────────────────────────────────────────────

  /// Reconcile the local total against the remote row.
  ///
  /// `final = max(local, remote)`; the remote row is written only when it
  /// was behind. A missing remote row counts as a total of 0. Single-flight
  /// per client: a second call while one is in progress fails fast with
  /// [`Error::SyncInFlight`] instead of queueing a redundant write.
  pub async fn sync_total(
    &self,
    key:         &UserKey,
    local_total: u64,
    now:         DateTime<Utc>,
  ) -> Result<SyncOutcome> {
    let Ok(_guard) = self.sync_gate.try_lock() else {
      return Err(Error::SyncInFlight);
    };

    let remote_total = self.fetch_total(key).await?.unwrap_or(0);
    let final_total = local_total.max(remote_total);

    let pushed = final_total > remote_total;
    if pushed {
      self.update_total(key, final_total, now).await?;
    }

    Ok(SyncOutcome { final_total, pushed })
  }
}

/// Pull the human-readable message out of a GoTrue error body.
fn auth_message(body: &str) -> Option<String> {
  let value: serde_json::Value = serde_json::from_str(body).ok()?;
  for field in ["error_description", "msg", "message"] {
    if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
      return Some(message.to_owned());
    }
  }
  None
}
