//! Tests for report layout and rendering.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use swot_core::record::{StudyRecord, StudyType, Subject};
use uuid::Uuid;

use crate::{
  build_rows, build_summary, render_report, report_file_name, Error,
};

fn base_time() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

fn record(subject: Subject, offset_secs: i64, duration_secs: u64) -> StudyRecord {
  let start_time = base_time() + Duration::seconds(offset_secs);
  let end_time = start_time + Duration::seconds(duration_secs as i64);

  StudyRecord {
    id: Uuid::new_v4(),
    study_type: StudyType::SelfStudy,
    subject,
    start_time,
    end_time,
    duration_secs,
    date: start_time.date_naive(),
  }
}

// ─── Rows and summary ────────────────────────────────────────────────────────

#[test]
fn rows_preserve_order_and_format_cells() {
  let records = vec![
    record(Subject::Physics, 0, 125),
    record(Subject::ComputerScience, 3600, 600),
  ];

  let rows = build_rows(&records);
  assert_eq!(rows.len(), 2);

  assert_eq!(rows[0].date, "01/06/2025");
  assert_eq!(rows[0].subject, "Physics");
  assert_eq!(rows[0].start, "09:00 am");
  assert_eq!(rows[0].end, "09:02 am");
  assert_eq!(rows[0].duration, "00:02:05");

  assert_eq!(rows[1].subject, "Computer Science");
  assert_eq!(rows[1].start, "10:00 am");
  assert_eq!(rows[1].duration, "00:10:00");
}

#[test]
fn summary_totals_all_rows() {
  let records = vec![
    record(Subject::Physics, 0, 600),
    record(Subject::Chemistry, 700, 300),
  ];

  let summary = build_summary(&records);
  assert_eq!(summary.sessions, 2);
  assert_eq!(summary.total_time, "0h 15m");
}

// ─── File name ───────────────────────────────────────────────────────────────

#[test]
fn file_name_embeds_type_slug_and_date() {
  let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
  assert_eq!(
    report_file_name(StudyType::SelfStudy, day),
    "self-study-report-2025-06-01.pdf"
  );

  let eve = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
  assert_eq!(
    report_file_name(StudyType::LectureStudy, eve),
    "lecture-study-report-2025-12-31.pdf"
  );
}

// ─── Rendering ───────────────────────────────────────────────────────────────

#[test]
fn rendering_empty_list_is_refused() {
  let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
  let path = std::env::temp_dir().join("swot-empty-report.pdf");

  let err = render_report(&[], StudyType::SelfStudy, day, &path).unwrap_err();
  assert!(matches!(err, Error::NoRecords));
  assert!(!path.exists());
}

#[test]
fn renders_a_pdf_file() {
  let records = vec![
    record(Subject::Physics, 0, 3600),
    record(Subject::Maths, 4000, 1800),
  ];
  let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
  let path = std::env::temp_dir().join("swot-report-smoke.pdf");

  render_report(&records, StudyType::SelfStudy, day, &path).unwrap();

  let bytes = std::fs::read(&path).unwrap();
  assert!(bytes.starts_with(b"%PDF"));
  std::fs::remove_file(&path).ok();
}

#[test]
fn long_record_lists_span_pages() {
  // Enough rows to force at least one page break.
  let records: Vec<_> = (0..80)
    .map(|i| record(Subject::Physics, i * 600, 300))
    .collect();
  let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
  let path = std::env::temp_dir().join("swot-report-paged.pdf");

  render_report(&records, StudyType::SelfStudy, day, &path).unwrap();

  let bytes = std::fs::read(&path).unwrap();
  assert!(bytes.starts_with(b"%PDF"));
  std::fs::remove_file(&path).ok();
}
