//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use swot_core::{
  record::{StudyRecord, StudyType, Subject},
  store::StudyStore,
  user::UserData,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn base_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

fn record(
  study_type:    StudyType,
  subject:       Subject,
  offset_secs:   i64,
  duration_secs: u64,
) -> StudyRecord {
  let start_time = base_time() + Duration::seconds(offset_secs);
  let end_time = start_time + Duration::seconds(duration_secs as i64);

  StudyRecord {
    id: Uuid::new_v4(),
    study_type,
    subject,
    start_time,
    end_time,
    duration_secs,
    date: start_time.date_naive(),
  }
}

fn profile() -> UserData {
  UserData {
    name:         "Kiran".into(),
    class:        "12".into(),
    state:        "Kerala".into(),
    city:         "Kochi".into(),
    phone:        "9876543210".into(),
    email:        "kiran@example.com".into(),
    is_verified:  false,
    key:          None,
    username:     None,
    auth_user_id: None,
  }
}

// ─── User profile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_user_data() {
  let s = store().await;

  s.save_user_data(profile()).await.unwrap();

  let fetched = s.get_user_data().await.unwrap();
  assert!(fetched.is_some());
  let fetched = fetched.unwrap();
  assert_eq!(fetched.name, "Kiran");
  assert_eq!(fetched.email, "kiran@example.com");
  assert!(!fetched.is_verified);
}

#[tokio::test]
async fn get_user_data_missing_returns_none() {
  let s = store().await;
  let result = s.get_user_data().await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn get_user_data_is_repeatable() {
  let s = store().await;
  s.save_user_data(profile()).await.unwrap();

  let first = s.get_user_data().await.unwrap();
  let second = s.get_user_data().await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn save_user_data_replaces_previous() {
  let s = store().await;
  s.save_user_data(profile()).await.unwrap();

  let mut updated = profile();
  updated.city = "Thrissur".into();
  updated.key = Some("SWOT-ABC-12345678".into());
  s.save_user_data(updated).await.unwrap();

  let fetched = s.get_user_data().await.unwrap().unwrap();
  assert_eq!(fetched.city, "Thrissur");
  assert_eq!(fetched.key.as_deref(), Some("SWOT-ABC-12345678"));
}

// ─── Study records ───────────────────────────────────────────────────────────

#[tokio::test]
async fn records_empty_by_default() {
  let s = store().await;
  let records = s.get_study_records().await.unwrap();
  assert!(records.is_empty());
}

#[tokio::test]
async fn save_record_prepends_most_recent_first() {
  let s = store().await;

  let first = record(StudyType::SelfStudy, Subject::Physics, 0, 600);
  let second = record(StudyType::SelfStudy, Subject::Chemistry, 700, 300);
  let third = record(StudyType::LectureStudy, Subject::Maths, 1100, 900);

  s.save_study_record(first.clone()).await.unwrap();
  s.save_study_record(second.clone()).await.unwrap();
  s.save_study_record(third.clone()).await.unwrap();

  let records = s.get_study_records().await.unwrap();
  assert_eq!(records.len(), 3);
  assert_eq!(records[0].id, third.id);
  assert_eq!(records[1].id, second.id);
  assert_eq!(records[2].id, first.id);
}

#[tokio::test]
async fn stored_record_fields_survive_roundtrip() {
  let s = store().await;

  let original = record(StudyType::LectureStudy, Subject::ComputerScience, 0, 125);
  s.save_study_record(original.clone()).await.unwrap();

  let records = s.get_study_records().await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0], original);
}

#[tokio::test]
async fn duplicate_record_id_rejected() {
  let s = store().await;

  let original = record(StudyType::SelfStudy, Subject::Physics, 0, 600);
  s.save_study_record(original.clone()).await.unwrap();

  let mut copy = record(StudyType::LectureStudy, Subject::Maths, 700, 300);
  copy.id = original.id;

  let err = s.save_study_record(copy).await.unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateRecord(id) if id == original.id));

  // The stored list must be untouched.
  let records = s.get_study_records().await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0], original);
}

#[tokio::test]
async fn records_filtered_by_type_keep_relative_order() {
  let s = store().await;

  let a = record(StudyType::SelfStudy, Subject::Physics, 0, 600);
  let b = record(StudyType::LectureStudy, Subject::Chemistry, 700, 300);
  let c = record(StudyType::SelfStudy, Subject::Maths, 1100, 900);

  s.save_study_record(a.clone()).await.unwrap();
  s.save_study_record(b.clone()).await.unwrap();
  s.save_study_record(c.clone()).await.unwrap();

  let self_study = s.get_records_by_type(StudyType::SelfStudy).await.unwrap();
  assert_eq!(self_study.len(), 2);
  assert_eq!(self_study[0].id, c.id);
  assert_eq!(self_study[1].id, a.id);

  let lectures = s
    .get_records_by_type(StudyType::LectureStudy)
    .await
    .unwrap();
  assert_eq!(lectures.len(), 1);
  assert_eq!(lectures[0].id, b.id);
}

// ─── Access key ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn app_key_roundtrips_raw() {
  let s = store().await;

  s.save_app_key("SWOT-K2JH4X-AB12CD34".into()).await.unwrap();

  let key = s.get_app_key().await.unwrap();
  assert_eq!(key.as_deref(), Some("SWOT-K2JH4X-AB12CD34"));
}

#[tokio::test]
async fn app_key_missing_returns_none() {
  let s = store().await;
  assert!(s.get_app_key().await.unwrap().is_none());
}

#[tokio::test]
async fn app_key_overwrite_replaces() {
  let s = store().await;

  s.save_app_key("SWOT-OLD-00000000".into()).await.unwrap();
  s.save_app_key("SWOT-NEW-11111111".into()).await.unwrap();

  let key = s.get_app_key().await.unwrap();
  assert_eq!(key.as_deref(), Some("SWOT-NEW-11111111"));
}

// ─── Reset ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn clear_all_data_removes_everything() {
  let s = store().await;

  s.save_user_data(profile()).await.unwrap();
  s.save_study_record(record(StudyType::SelfStudy, Subject::Physics, 0, 600))
    .await
    .unwrap();
  s.save_app_key("SWOT-K2JH4X-AB12CD34".into()).await.unwrap();

  s.clear_all_data().await.unwrap();

  assert!(s.get_user_data().await.unwrap().is_none());
  assert!(s.get_study_records().await.unwrap().is_empty());
  assert!(s.get_app_key().await.unwrap().is_none());
}

#[tokio::test]
async fn clear_all_data_on_empty_store_is_fine() {
  let s = store().await;
  s.clear_all_data().await.unwrap();
  assert!(s.get_study_records().await.unwrap().is_empty());
}
