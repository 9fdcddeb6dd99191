//! The `StudyStore` trait — durable persistence of the three local entries.
//!
//! The trait is implemented by storage backends (e.g. `swot-store-sqlite`).
//! Higher layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  record::{StudyRecord, StudyType},
  user::UserData,
};

/// Abstraction over the local key-value store.
///
/// Three independent entries live behind fixed keys: the user profile, the
/// access key, and the study-record list. Values are read and written whole;
/// callers read-modify-write full objects, there are no partial-field
/// updates at this layer. Every operation is fallible and failures propagate
/// untouched — no retry or recovery happens here.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait StudyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Profile ───────────────────────────────────────────────────────────

  /// Persist the full profile object, replacing any existing one.
  fn save_user_data(
    &self,
    data: UserData,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Read the profile. `None` if none has been saved.
  fn get_user_data(
    &self,
  ) -> impl Future<Output = Result<Option<UserData>, Self::Error>> + Send + '_;

  // ── Study records ─────────────────────────────────────────────────────

  /// Prepend a completed record to the stored list (most-recent-first).
  ///
  /// A record id already present in the list is rejected with a typed
  /// error and the list is left unchanged.
  fn save_study_record(
    &self,
    record: StudyRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The full record list, most-recent-first. Empty if none saved.
  fn get_study_records(
    &self,
  ) -> impl Future<Output = Result<Vec<StudyRecord>, Self::Error>> + Send + '_;

  /// The subsequence of records with the given type, relative order
  /// preserved.
  fn get_records_by_type(
    &self,
    study_type: StudyType,
  ) -> impl Future<Output = Result<Vec<StudyRecord>, Self::Error>> + Send + '_;

  // ── Access key ────────────────────────────────────────────────────────

  /// Persist the access key, replacing any existing one.
  fn save_app_key(
    &self,
    key: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Read the access key. `None` if none has been saved.
  fn get_app_key(
    &self,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  // ── Reset ─────────────────────────────────────────────────────────────

  /// Remove all three entries. The logout/reset primitive.
  fn clear_all_data(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
