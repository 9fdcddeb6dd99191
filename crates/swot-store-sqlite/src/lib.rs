//! SQLite-backed implementation of the swot study store.
//!
//! Everything lives in one `entries` key-value table; the record list and
//! user profile are stored as whole JSON blobs under well-known keys, so
//! writes are whole-value replacements. A single process owns the file.

mod error;
mod schema;
mod store;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
