//! Unit tests for the core domain: formatting, the timer state machine,
//! stats folds, and input validation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::{
  Error,
  format::{format_date, format_hms, format_hours_minutes, format_time_of_day},
  record::{StudyRecord, StudyType, Subject},
  stats::{session_count, subject_breakdown, total_time, type_stats},
  timer::Timer,
  user::{
    UserData, generate_access_key, sanitize_username, valid_email,
    valid_phone, validate_password, validate_profile, validate_username,
  },
};

/// A fixed morning instant plus an offset, so every test works with the
/// same clock.
fn instant(offset_secs: i64) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    + Duration::seconds(offset_secs)
}

fn record(
  study_type: StudyType,
  subject: Subject,
  duration_secs: u64,
) -> StudyRecord {
  let start = instant(0);
  StudyRecord {
    id: Uuid::new_v4(),
    study_type,
    subject,
    start_time: start,
    end_time: start + Duration::seconds(duration_secs as i64),
    duration_secs,
    date: start.date_naive(),
  }
}

// ─── Formatting ──────────────────────────────────────────────────────────────

#[test]
fn hms_pads_components() {
  assert_eq!(format_hms(0), "00:00:00");
  assert_eq!(format_hms(125), "00:02:05");
  assert_eq!(format_hms(3661), "01:01:01");
}

#[test]
fn hms_hours_grow_past_two_digits() {
  assert_eq!(format_hms(100 * 3600 + 61), "100:01:01");
}

#[test]
fn hours_minutes_form() {
  assert_eq!(format_hours_minutes(0), "0h 0m");
  assert_eq!(format_hours_minutes(12 * 3600 + 34 * 60 + 56), "12h 34m");
}

#[test]
fn date_and_time_labels() {
  let morning = instant(0);
  assert_eq!(format_date(&morning), "01/06/2025");
  assert_eq!(format_time_of_day(&morning), "09:00 am");

  let afternoon = Utc.with_ymd_and_hms(2025, 6, 1, 16, 5, 0).unwrap();
  assert_eq!(format_time_of_day(&afternoon), "04:05 pm");
}

// ─── Timer ───────────────────────────────────────────────────────────────────

#[test]
fn stop_computes_duration_from_instants() {
  let mut timer = Timer::new(StudyType::SelfStudy, Subject::Physics);
  timer.start(instant(0)).unwrap();

  // Ticks along the way do not matter for the final duration.
  assert_eq!(timer.tick(instant(5)), 5);
  assert_eq!(timer.tick(instant(60)), 60);

  let rec = timer.stop(instant(125)).unwrap();
  assert_eq!(rec.duration_secs, 125);
  assert_eq!((rec.end_time - rec.start_time).num_seconds(), 125);
  assert_eq!(format_hms(rec.duration_secs), "00:02:05");
  assert_eq!(rec.study_type, StudyType::SelfStudy);
  assert_eq!(rec.subject, Subject::Physics);
  assert_eq!(rec.date, instant(0).date_naive());
}

#[test]
fn tick_resynchronises_after_a_gap() {
  let mut timer = Timer::new(StudyType::SelfStudy, Subject::Maths);
  timer.start(instant(0)).unwrap();
  timer.tick(instant(3));

  // A long gap (suspension) is fully reflected by the next tick.
  assert_eq!(timer.tick(instant(3600)), 3600);
}

#[test]
fn tick_while_idle_is_a_noop() {
  let mut timer = Timer::new(StudyType::LectureStudy, Subject::English);
  assert_eq!(timer.tick(instant(10)), 0);
  assert!(!timer.is_running());
}

#[test]
fn stop_resets_but_keeps_subject() {
  let mut timer = Timer::new(StudyType::SelfStudy, Subject::Chemistry);
  timer.start(instant(0)).unwrap();
  timer.stop(instant(10)).unwrap();

  assert!(!timer.is_running());
  assert_eq!(timer.elapsed_secs(), 0);
  assert_eq!(timer.subject(), Subject::Chemistry);
}

#[test]
fn start_while_running_errors() {
  let mut timer = Timer::new(StudyType::SelfStudy, Subject::Physics);
  timer.start(instant(0)).unwrap();
  assert!(matches!(timer.start(instant(1)), Err(Error::TimerRunning)));
}

#[test]
fn stop_while_idle_errors() {
  let mut timer = Timer::new(StudyType::SelfStudy, Subject::Physics);
  assert!(matches!(timer.stop(instant(1)), Err(Error::TimerNotRunning)));
}

#[test]
fn selection_locked_while_running() {
  let mut timer = Timer::new(StudyType::SelfStudy, Subject::Physics);
  timer.start(instant(0)).unwrap();

  assert!(matches!(
    timer.set_subject(Subject::Hindi),
    Err(Error::SelectionLocked)
  ));
  assert!(matches!(
    timer.set_study_type(StudyType::LectureStudy),
    Err(Error::SelectionLocked)
  ));

  timer.stop(instant(5)).unwrap();
  timer.set_subject(Subject::Hindi).unwrap();
  assert_eq!(timer.subject(), Subject::Hindi);
}

#[test]
fn backwards_clock_step_clamps_to_zero() {
  let mut timer = Timer::new(StudyType::SelfStudy, Subject::Physics);
  timer.start(instant(100)).unwrap();

  let rec = timer.stop(instant(50)).unwrap();
  assert_eq!(rec.duration_secs, 0);
  assert_eq!(rec.end_time, rec.start_time);
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[test]
fn totals_over_two_records() {
  let records = vec![
    record(StudyType::SelfStudy, Subject::Physics, 600),
    record(StudyType::SelfStudy, Subject::Maths, 300),
  ];
  assert_eq!(session_count(&records), 2);
  assert_eq!(total_time(&records), 900);
}

#[test]
fn total_time_of_empty_list_is_zero() {
  assert_eq!(total_time(&[]), 0);
}

#[test]
fn type_stats_only_counts_matching_records() {
  let records = vec![
    record(StudyType::SelfStudy, Subject::Physics, 600),
    record(StudyType::LectureStudy, Subject::Physics, 1200),
    record(StudyType::SelfStudy, Subject::Maths, 300),
  ];
  let stats = type_stats(&records, StudyType::SelfStudy);
  assert_eq!(stats.sessions, 2);
  assert_eq!(stats.total_secs, 900);
}

#[test]
fn breakdown_rounds_integer_percentages() {
  let records = vec![
    record(StudyType::SelfStudy, Subject::Physics, 100),
    record(StudyType::SelfStudy, Subject::Chemistry, 300),
  ];
  let shares = subject_breakdown(&records);
  assert_eq!(shares.len(), 2);

  let physics = shares.iter().find(|s| s.subject == Subject::Physics).unwrap();
  let chemistry =
    shares.iter().find(|s| s.subject == Subject::Chemistry).unwrap();
  assert_eq!(physics.percent, 25);
  assert_eq!(chemistry.percent, 75);
}

#[test]
fn breakdown_groups_repeat_subjects_in_first_appearance_order() {
  let records = vec![
    record(StudyType::SelfStudy, Subject::Maths, 100),
    record(StudyType::SelfStudy, Subject::Physics, 50),
    record(StudyType::SelfStudy, Subject::Maths, 200),
  ];
  let shares = subject_breakdown(&records);
  assert_eq!(shares.len(), 2);
  assert_eq!(shares[0].subject, Subject::Maths);
  assert_eq!(shares[0].total_secs, 300);
  assert_eq!(shares[1].subject, Subject::Physics);
}

#[test]
fn breakdown_with_zero_total_has_zero_percentages() {
  let records = vec![record(StudyType::SelfStudy, Subject::Physics, 0)];
  let shares = subject_breakdown(&records);
  assert_eq!(shares[0].percent, 0);
}

// ─── Record wire format ──────────────────────────────────────────────────────

#[test]
fn record_serialises_with_kebab_case_labels() {
  let rec = record(StudyType::SelfStudy, Subject::ComputerScience, 60);
  let json = serde_json::to_value(&rec).unwrap();

  assert_eq!(json["study_type"], "self-study");
  assert_eq!(json["subject"], "computer-science");

  let back: StudyRecord = serde_json::from_value(json).unwrap();
  assert_eq!(back, rec);
}

#[test]
fn labels_parse_back_from_slugs() {
  assert_eq!("lecture-study".parse::<StudyType>().unwrap(), StudyType::LectureStudy);
  assert_eq!("social-studies".parse::<Subject>().unwrap(), Subject::SocialStudies);
  assert!(matches!(
    "algebra".parse::<Subject>(),
    Err(Error::UnknownSubject(_))
  ));
}

// ─── Validation and keys ─────────────────────────────────────────────────────

fn profile() -> UserData {
  UserData {
    name:  "Kiran".into(),
    class: "12th".into(),
    state: "Karnataka".into(),
    city:  "Mysuru".into(),
    phone: "9876543210".into(),
    email: "kiran@example.com".into(),
    ..UserData::default()
  }
}

#[test]
fn complete_profile_validates() {
  assert!(validate_profile(&profile()).is_ok());
}

#[test]
fn blank_field_is_rejected_by_name() {
  let mut p = profile();
  p.city = "  ".into();
  assert!(matches!(validate_profile(&p), Err(Error::MissingField("city"))));
}

#[test]
fn phone_must_be_ten_digits() {
  assert!(valid_phone("9876543210"));
  assert!(!valid_phone("98765"));
  assert!(!valid_phone("98765432$0"));
  assert!(!valid_phone("98765432100"));
}

#[test]
fn email_shape_checks() {
  assert!(valid_email("a@b.co"));
  assert!(valid_email("first.last@sub.example.org"));
  assert!(!valid_email("nodomain@"));
  assert!(!valid_email("@nouser.com"));
  assert!(!valid_email("two@@ats.com"));
  assert!(!valid_email("no-dot@domain"));
  assert!(!valid_email("spaces in@mail.com"));
}

#[test]
fn password_needs_six_characters() {
  assert!(matches!(validate_password("12345"), Err(Error::PasswordTooShort)));
  assert!(validate_password("123456").is_ok());
}

#[test]
fn usernames_are_sanitised_then_validated() {
  assert_eq!(sanitize_username("Study Hard!"), "studyhard");
  assert_eq!(sanitize_username("Topper_01"), "topper_01");

  assert!(validate_username("topper_01").is_ok());
  assert!(matches!(validate_username("ab"), Err(Error::InvalidUsername)));
  assert!(matches!(
    validate_username("this_name_is_far_too_long"),
    Err(Error::InvalidUsername)
  ));
  assert!(matches!(validate_username("No-Caps"), Err(Error::InvalidUsername)));
}

#[test]
fn access_keys_are_uppercase_and_deterministic() {
  let now = instant(0);
  let key = generate_access_key(now, 0x5eed);

  assert!(key.starts_with("SWOT-"));
  assert_eq!(key, key.to_uppercase());
  assert_eq!(key.split('-').count(), 3);
  assert_eq!(key, generate_access_key(now, 0x5eed));

  // Different entropy, different key.
  assert_ne!(key, generate_access_key(now, 0x5eee));
}

#[test]
fn access_key_at_epoch_zero() {
  let epoch = Utc.timestamp_opt(0, 0).unwrap();
  assert_eq!(generate_access_key(epoch, 0), "SWOT-0-0");
}
