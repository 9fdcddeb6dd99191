//! Client for the hosted Supabase backend.
//!
//! Two surfaces: GoTrue auth (`/auth/v1`) for email/password credentials,
//! and PostgREST (`/rest/v1`) for the `users` and `feedback` tables. The
//! backend is a write-mostly mirror of local state — the only figure ever
//! reconciled is the aggregate `total_study_time`, never the record list.

mod client;
mod error;
mod types;

pub use client::{SupabaseClient, SupabaseConfig};
pub use error::{Error, Result};
pub use types::{
  AuthUser, LeaderboardEntry, NewFeedback, NewUser, ProfileUpdate,
  RemoteUser, Session, SignupOutcome, SyncOutcome, UserKey,
};
