//! Core types and trait definitions for the swot study tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies;
//! every other crate in the workspace builds on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod format;
pub mod record;
pub mod stats;
pub mod store;
pub mod timer;
pub mod user;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
