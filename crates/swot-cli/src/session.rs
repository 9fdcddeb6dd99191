//! Shared command context: the open store, the loaded profile, and the
//! settings needed to reach the backend.

use anyhow::{Context, Result};
use swot_core::{store::StudyStore as _, user::UserData};
use swot_store_sqlite::SqliteStore;
use swot_supabase::{SupabaseClient, SupabaseConfig, UserKey};

use crate::config::SwotConfig;

pub struct Session {
  pub store:  SqliteStore,
  pub config: SwotConfig,
  /// Profile as stored on disk at startup. `None` before signup/login.
  pub user: Option<UserData>,
}

impl Session {
  /// Open the database (creating its directory if needed) and load the
  /// stored profile.
  pub async fn init(config: SwotConfig) -> Result<Self> {
    if let Some(dir) = config.db_path.parent()
      && !dir.as_os_str().is_empty()
    {
      std::fs::create_dir_all(dir)
        .with_context(|| format!("creating data directory {}", dir.display()))?;
    }

    let store = SqliteStore::open(&config.db_path)
      .await
      .with_context(|| format!("opening database {}", config.db_path.display()))?;
    let user = store.get_user_data().await?;

    Ok(Self { store, config, user })
  }

  /// Build the backend client. Errors when no Supabase project is configured.
  pub fn remote(&self) -> Result<SupabaseClient> {
    if self.config.supabase_url.is_empty() || self.config.supabase_anon_key.is_empty() {
      anyhow::bail!(
        "no backend configured; set supabase_url and supabase_anon_key in \
         ~/.config/swot/config.toml (or SWOT_SUPABASE_URL / SWOT_SUPABASE_ANON_KEY)"
      );
    }
    Ok(SupabaseClient::new(SupabaseConfig {
      base_url: self.config.supabase_url.clone(),
      anon_key: self.config.supabase_anon_key.clone(),
    })?)
  }

  /// The stored access key, as the backend row filter.
  pub async fn require_key(&self) -> Result<UserKey> {
    let key = self
      .store
      .get_app_key()
      .await?
      .context("not signed in; run `swot signup` or `swot login` first")?;
    Ok(UserKey::AccessKey(key))
  }

  /// Drop all local state. The logout primitive.
  pub async fn logout(&mut self) -> Result<()> {
    self.store.clear_all_data().await?;
    self.user = None;
    Ok(())
  }
}
