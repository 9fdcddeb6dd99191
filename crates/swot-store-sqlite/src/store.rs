//! [`SqliteStore`] — the SQLite implementation of [`StudyStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use swot_core::{
  record::{StudyRecord, StudyType},
  store::StudyStore,
  user::UserData,
};

use crate::{
  schema::{KEY_APP_KEY, KEY_STUDY_RECORDS, KEY_USER_DATA, SCHEMA},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A swot study store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read one entry's raw value.
  async fn read_entry(&self, key: &'static str) -> Result<Option<String>> {
    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM entries WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(value)
  }

  /// Write one entry's raw value, replacing any existing one.
  async fn write_entry(&self, key: &'static str, value: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO entries (key, value) VALUES (?1, ?2)
           ON CONFLICT (key) DO UPDATE SET value = excluded.value",
          rusqlite::params![key, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── StudyStore impl ─────────────────────────────────────────────────────────

impl StudyStore for SqliteStore {
  type Error = Error;

  // ── User profile ──────────────────────────────────────────────────────────

  async fn save_user_data(&self, data: UserData) -> Result<()> {
    let json = serde_json::to_string(&data)?;
    self.write_entry(KEY_USER_DATA, json).await
  }

  async fn get_user_data(&self) -> Result<Option<UserData>> {
    match self.read_entry(KEY_USER_DATA).await? {
      Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
      None => Ok(None),
    }
  }

  // ── Study records ─────────────────────────────────────────────────────────

  async fn save_study_record(&self, record: StudyRecord) -> Result<()> {
    // Whole-list read-modify-write; the store assumes a single writer.
    let mut records = self.get_study_records().await?;

    if records.iter().any(|existing| existing.id == record.id) {
      return Err(Error::DuplicateRecord(record.id));
    }
    records.insert(0, record);

    let json = serde_json::to_string(&records)?;
    self.write_entry(KEY_STUDY_RECORDS, json).await
  }

  async fn get_study_records(&self) -> Result<Vec<StudyRecord>> {
    match self.read_entry(KEY_STUDY_RECORDS).await? {
      Some(raw) => Ok(serde_json::from_str(&raw)?),
      None => Ok(Vec::new()),
    }
  }

  async fn get_records_by_type(
    &self,
    study_type: StudyType,
  ) -> Result<Vec<StudyRecord>> {
    let mut records = self.get_study_records().await?;
    records.retain(|record| record.study_type == study_type);
    Ok(records)
  }

  // ── Access key ────────────────────────────────────────────────────────────

  async fn save_app_key(&self, key: String) -> Result<()> {
    self.write_entry(KEY_APP_KEY, key).await
  }

  async fn get_app_key(&self) -> Result<Option<String>> {
    self.read_entry(KEY_APP_KEY).await
  }

  // ── Reset ─────────────────────────────────────────────────────────────────

  async fn clear_all_data(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute(
          "DELETE FROM entries WHERE key IN (?1, ?2, ?3)",
          rusqlite::params![KEY_USER_DATA, KEY_STUDY_RECORDS, KEY_APP_KEY],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
