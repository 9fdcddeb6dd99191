//! Aggregate statistics — pure folds over a record list.
//!
//! Everything here is recomputed on demand from the full list; nothing is
//! cached or persisted. Linear cost per call is fine at the record counts a
//! single user accumulates.

use crate::record::{StudyRecord, StudyType, Subject};

// ─── Types ───────────────────────────────────────────────────────────────────

/// Session count and summed duration for one study type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStats {
  pub sessions:   usize,
  pub total_secs: u64,
}

/// One subject's slice of the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectShare {
  pub subject:    Subject,
  pub total_secs: u64,
  /// Integer percentage of the grand total, rounded half up; 0 when the
  /// grand total is 0.
  pub percent: u32,
}

// ─── Folds ───────────────────────────────────────────────────────────────────

/// Sum of all durations, in seconds. 0 for the empty list.
pub fn total_time(records: &[StudyRecord]) -> u64 {
  records.iter().map(|r| r.duration_secs).sum()
}

/// Number of completed sessions.
pub fn session_count(records: &[StudyRecord]) -> usize { records.len() }

/// Count and total over the records of one study type.
pub fn type_stats(records: &[StudyRecord], study_type: StudyType) -> TypeStats {
  let mut stats = TypeStats { sessions: 0, total_secs: 0 };
  for record in records.iter().filter(|r| r.study_type == study_type) {
    stats.sessions += 1;
    stats.total_secs += record.duration_secs;
  }
  stats
}

/// Per-subject totals with each subject's percentage of the grand total.
///
/// Subjects appear in first-appearance order over `records`.
pub fn subject_breakdown(records: &[StudyRecord]) -> Vec<SubjectShare> {
  let mut totals: Vec<(Subject, u64)> = Vec::new();
  for record in records {
    match totals.iter_mut().find(|entry| entry.0 == record.subject) {
      Some(entry) => entry.1 += record.duration_secs,
      None => totals.push((record.subject, record.duration_secs)),
    }
  }

  let grand_total: u64 = totals.iter().map(|entry| entry.1).sum();

  totals
    .into_iter()
    .map(|(subject, total_secs)| SubjectShare {
      subject,
      total_secs,
      percent: percent_of(total_secs, grand_total),
    })
    .collect()
}

fn percent_of(part: u64, total: u64) -> u32 {
  if total == 0 {
    return 0;
  }
  ((part as f64 / total as f64) * 100.0).round() as u32
}
