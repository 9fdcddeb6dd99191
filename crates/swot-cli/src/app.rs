//! Timer application state and key handling.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use swot_core::{
  format::format_hms,
  record::{StudyType, Subject},
  store::StudyStore as _,
  timer::Timer,
};
use swot_store_sqlite::SqliteStore;

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level timer UI state.
pub struct TimerApp {
  /// The state machine driving the clock.
  pub timer: Timer,

  /// Completed runs saved since the UI opened.
  pub saved_this_session: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Store that completed runs are written to.
  store: SqliteStore,
}

impl TimerApp {
  pub fn new(store: SqliteStore, study_type: StudyType, subject: Subject) -> Self {
    Self {
      timer: Timer::new(study_type, subject),
      saved_this_session: 0,
      status_msg: String::new(),
      store,
    }
  }

  /// Resynchronise the clock before each frame.
  pub fn tick(&mut self) {
    self.timer.tick(Utc::now());
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere, discarding a live run.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match key.code {
      // Quit. A live run is discarded, never saved.
      KeyCode::Char('q') | KeyCode::Esc => return Ok(false),

      // Start, or stop-and-save.
      KeyCode::Char('s') | KeyCode::Char(' ') => {
        if self.timer.is_running() {
          let record = self.timer.stop(Utc::now())?;
          let duration = record.duration_secs;
          let subject = record.subject;
          self.store.save_study_record(record).await?;
          self.saved_this_session += 1;
          self.status_msg =
            format!("Saved {} of {}", format_hms(duration), subject.label());
        } else {
          self.timer.start(Utc::now())?;
          self.status_msg = String::new();
        }
      }

      // Cycle the subject (idle only; the timer refuses it while running).
      KeyCode::Tab => match self.timer.set_subject(next_subject(self.timer.subject())) {
        Ok(()) => self.status_msg = String::new(),
        Err(e) => self.status_msg = e.to_string(),
      },

      // Toggle the study type (idle only).
      KeyCode::Char('t') => {
        let next = match self.timer.study_type() {
          StudyType::SelfStudy => StudyType::LectureStudy,
          StudyType::LectureStudy => StudyType::SelfStudy,
        };
        match self.timer.set_study_type(next) {
          Ok(()) => self.status_msg = String::new(),
          Err(e) => self.status_msg = e.to_string(),
        }
      }

      _ => {}
    }
    Ok(true)
  }
}

/// The subject after `current` in display order, wrapping at the end.
fn next_subject(current: Subject) -> Subject {
  let i = Subject::ALL.iter().position(|s| *s == current).unwrap_or(0);
  Subject::ALL[(i + 1) % Subject::ALL.len()]
}
