//! Configuration loading: config file, environment, flag overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Merged configuration for one invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct SwotConfig {
  /// SQLite database path.
  #[serde(default = "default_db_path")]
  pub db_path: PathBuf,

  /// Supabase project URL. Remote commands are unavailable when empty.
  #[serde(default)]
  pub supabase_url: String,

  /// Supabase anon (publishable) key.
  #[serde(default)]
  pub supabase_anon_key: String,
}

fn default_db_path() -> PathBuf {
  PathBuf::from("~/.local/share/swot/swot.db")
}

/// Merge the config file, `SWOT_*` environment variables, and CLI flags.
/// Flags win over the environment, which wins over the file.
pub fn load(args: &crate::Args) -> Result<SwotConfig> {
  let path = args
    .config
    .clone()
    .unwrap_or_else(|| PathBuf::from("~/.config/swot/config.toml"));

  let settings = config::Config::builder()
    .add_source(config::File::from(expand_tilde(&path)).required(false))
    .add_source(config::Environment::with_prefix("SWOT"))
    .build()
    .context("failed to read config file")?;

  let mut cfg: SwotConfig = settings
    .try_deserialize()
    .context("failed to deserialise configuration")?;

  if let Some(db) = &args.db {
    cfg.db_path = db.clone();
  }
  if let Some(url) = &args.supabase_url {
    cfg.supabase_url = url.clone();
  }
  if let Some(key) = &args.supabase_anon_key {
    cfg.supabase_anon_key = key.clone();
  }

  cfg.db_path = expand_tilde(&cfg.db_path);
  Ok(cfg)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
