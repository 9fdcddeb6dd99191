//! Study records — the fundamental unit of the swot store.
//!
//! A record is an immutable fact about one completed study interval. Records
//! are never edited or deleted; the stored list only ever grows at the front.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Study type ──────────────────────────────────────────────────────────────

/// The two tracked study modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyType {
  SelfStudy,
  LectureStudy,
}

impl StudyType {
  pub const ALL: [StudyType; 2] =
    [StudyType::SelfStudy, StudyType::LectureStudy];

  /// Stable identifier used in storage, filters, and artifact names.
  pub fn slug(&self) -> &'static str {
    match self {
      StudyType::SelfStudy => "self-study",
      StudyType::LectureStudy => "lecture-study",
    }
  }

  /// Human-facing label.
  pub fn label(&self) -> &'static str {
    match self {
      StudyType::SelfStudy => "Self Study",
      StudyType::LectureStudy => "Lecture Study",
    }
  }
}

impl std::fmt::Display for StudyType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.slug())
  }
}

impl std::str::FromStr for StudyType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "self-study" => Ok(StudyType::SelfStudy),
      "lecture-study" => Ok(StudyType::LectureStudy),
      other => Err(Error::UnknownStudyType(other.to_string())),
    }
  }
}

// ─── Subject ─────────────────────────────────────────────────────────────────

/// The subject a session is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
  Physics,
  Chemistry,
  Maths,
  ComputerScience,
  English,
  Hindi,
  SocialStudies,
  Mixed,
}

impl Subject {
  /// Every subject, in display/cycling order.
  pub const ALL: [Subject; 8] = [
    Subject::Physics,
    Subject::Chemistry,
    Subject::Maths,
    Subject::ComputerScience,
    Subject::English,
    Subject::Hindi,
    Subject::SocialStudies,
    Subject::Mixed,
  ];

  /// Stable identifier used in storage and CLI arguments.
  pub fn slug(&self) -> &'static str {
    match self {
      Subject::Physics => "physics",
      Subject::Chemistry => "chemistry",
      Subject::Maths => "maths",
      Subject::ComputerScience => "computer-science",
      Subject::English => "english",
      Subject::Hindi => "hindi",
      Subject::SocialStudies => "social-studies",
      Subject::Mixed => "mixed",
    }
  }

  /// Human-facing label.
  pub fn label(&self) -> &'static str {
    match self {
      Subject::Physics => "Physics",
      Subject::Chemistry => "Chemistry",
      Subject::Maths => "Maths",
      Subject::ComputerScience => "Computer Science",
      Subject::English => "English",
      Subject::Hindi => "Hindi",
      Subject::SocialStudies => "Social Studies",
      Subject::Mixed => "Mixed",
    }
  }
}

impl std::fmt::Display for Subject {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.slug())
  }
}

impl std::str::FromStr for Subject {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    Subject::ALL
      .into_iter()
      .find(|subject| subject.slug() == s)
      .ok_or_else(|| Error::UnknownSubject(s.to_string()))
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// An immutable fact about one completed study interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRecord {
  pub id:         Uuid,
  pub study_type: StudyType,
  pub subject:    Subject,
  pub start_time: DateTime<Utc>,
  pub end_time:   DateTime<Utc>,
  /// Whole seconds; always `end_time - start_time`.
  pub duration_secs: u64,
  /// Calendar date of `start_time`; used for display grouping only.
  pub date: NaiveDate,
}
