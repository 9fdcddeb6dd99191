//! SQL schema for the swot SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- A plain key-value table. Only the keys named by the KEY_* constants
-- are ever written; values are replaced whole, never patched.
CREATE TABLE IF NOT EXISTS entries (
    key    TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);

PRAGMA user_version = 1;
";

/// The user profile, one JSON object.
pub const KEY_USER_DATA: &str = "user_data";

/// The study-record list, one JSON array ordered most-recent-first.
pub const KEY_STUDY_RECORDS: &str = "study_records";

/// The access key, stored raw rather than JSON-encoded.
pub const KEY_APP_KEY: &str = "app_key";
