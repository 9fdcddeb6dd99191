//! The timer state machine.
//!
//! One [`Timer`] value drives a run: idle → running → idle. Elapsed time is
//! recomputed from the start instant on every tick rather than accumulated,
//! so missed ticks (a suspended process, a stalled event loop) never show
//! stale totals — the next tick reflects true wall-clock elapsed time.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  Error, Result,
  record::{StudyRecord, StudyType, Subject},
};

/// Stopwatch over one study subject.
///
/// All transitions take the current instant as an argument; the timer never
/// reads a clock itself.
#[derive(Debug, Clone)]
pub struct Timer {
  study_type:   StudyType,
  subject:      Subject,
  started_at:   Option<DateTime<Utc>>,
  elapsed_secs: u64,
}

impl Timer {
  /// A fresh idle timer with zero elapsed time.
  pub fn new(study_type: StudyType, subject: Subject) -> Self {
    Self { study_type, subject, started_at: None, elapsed_secs: 0 }
  }

  pub fn is_running(&self) -> bool { self.started_at.is_some() }

  pub fn study_type(&self) -> StudyType { self.study_type }

  pub fn subject(&self) -> Subject { self.subject }

  pub fn elapsed_secs(&self) -> u64 { self.elapsed_secs }

  /// Begin a run at `now`. Errors if a run is already in progress.
  pub fn start(&mut self, now: DateTime<Utc>) -> Result<()> {
    if self.started_at.is_some() {
      return Err(Error::TimerRunning);
    }
    self.started_at = Some(now);
    self.elapsed_secs = 0;
    Ok(())
  }

  /// Resynchronise elapsed time against `now` and return it.
  ///
  /// A no-op while idle. The recompute goes back to the start instant
  /// instead of incrementing a counter, so drift cannot accumulate.
  pub fn tick(&mut self, now: DateTime<Utc>) -> u64 {
    if let Some(started_at) = self.started_at {
      self.elapsed_secs = whole_seconds(started_at, now);
    }
    self.elapsed_secs
  }

  /// Stop the run at `now` and produce the completed record.
  ///
  /// The duration is computed here from the start/end pair, never taken
  /// from the last tick. Afterwards the timer is idle with zero elapsed
  /// time and the subject selection preserved.
  pub fn stop(&mut self, now: DateTime<Utc>) -> Result<StudyRecord> {
    let started_at = self.started_at.ok_or(Error::TimerNotRunning)?;
    // A wall clock that stepped backwards mid-run must not yield a
    // negative span; clamp the end to the start.
    let end_time = now.max(started_at);

    let record = StudyRecord {
      id:            Uuid::new_v4(),
      study_type:    self.study_type,
      subject:       self.subject,
      start_time:    started_at,
      end_time,
      duration_secs: whole_seconds(started_at, end_time),
      date:          started_at.date_naive(),
    };

    self.started_at = None;
    self.elapsed_secs = 0;
    Ok(record)
  }

  /// Select the subject for the next run. Locked while running.
  pub fn set_subject(&mut self, subject: Subject) -> Result<()> {
    if self.started_at.is_some() {
      return Err(Error::SelectionLocked);
    }
    self.subject = subject;
    Ok(())
  }

  /// Select the study type for the next run. Locked while running.
  pub fn set_study_type(&mut self, study_type: StudyType) -> Result<()> {
    if self.started_at.is_some() {
      return Err(Error::SelectionLocked);
    }
    self.study_type = study_type;
    Ok(())
  }
}

fn whole_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
  (to - from).num_seconds().max(0) as u64
}
