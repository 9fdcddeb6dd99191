//! One function per subcommand (the timer itself lives in `app`/`ui`).
//!
//! Commands print their outcome on stdout and return errors for `main` to
//! surface. Local state is written before any backend mirror, so a network
//! failure never loses data.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rand_core::{OsRng, RngCore as _};
use swot_core::{
  format::{format_date, format_hms, format_hours_minutes, format_time_of_day},
  record::StudyType,
  stats,
  store::StudyStore as _,
  user::{
    UserData, generate_access_key, sanitize_username, validate_password,
    validate_profile, validate_username,
  },
};
use swot_supabase::{NewFeedback, NewUser, ProfileUpdate, SignupOutcome, UserKey};

use crate::session::Session;

// ─── Accounts ─────────────────────────────────────────────────────────────────

pub async fn signup(
  session: &mut Session,
  mut profile: UserData,
  password: &str,
) -> Result<()> {
  validate_profile(&profile)?;
  validate_password(password)?;

  let remote = session.remote()?;
  let outcome = remote
    .sign_up(&profile.email, password)
    .await
    .context("signup failed")?;

  let (auth_user_id, verified) = match &outcome {
    SignupOutcome::SignedIn(auth) => (auth.user.id, true),
    SignupOutcome::Pending(auth_user) => (auth_user.id, false),
  };

  // The access key identifies this user's backend row from now on.
  let key = generate_access_key(Utc::now(), OsRng.next_u64());
  remote
    .create_user_row(&NewUser {
      name:             profile.name.clone(),
      class:            profile.class.clone(),
      state:            profile.state.clone(),
      city:             profile.city.clone(),
      phone:            profile.phone.clone(),
      email:            profile.email.clone(),
      access_key:       key.clone(),
      auth_user_id:     Some(auth_user_id),
      total_study_time: 0,
    })
    .await
    .context("creating the backend user row")?;

  profile.is_verified = verified;
  profile.key = Some(key.clone());
  profile.auth_user_id = Some(auth_user_id);

  if !verified {
    println!(
      "Check {} for a confirmation link, then sign in on other devices with \
       `swot login`.",
      profile.email
    );
  }

  session.store.save_app_key(key.clone()).await?;
  session.store.save_user_data(profile).await?;

  println!("Account created. Access key: {key}");
  Ok(())
}

pub async fn login(session: &mut Session, email: &str, password: &str) -> Result<()> {
  let remote = session.remote()?;
  let auth = remote.sign_in(email, password).await?;

  // Pull the backend row to recover the access key and profile fields.
  let row = remote
    .get_user(&UserKey::AuthUser(auth.user.id))
    .await?
    .context("signed in, but no swot account row exists for this login")?;
  let key = row
    .access_key
    .clone()
    .context("the backend row is missing its access key")?;

  let profile = UserData {
    name:  row.name.unwrap_or_default(),
    class: row.class.unwrap_or_default(),
    state: row.state.unwrap_or_default(),
    city:  row.city.unwrap_or_default(),
    phone: row.phone.unwrap_or_default(),
    email: row.email.unwrap_or_else(|| email.to_string()),
    is_verified: true,
    key: Some(key.clone()),
    username: row.username,
    auth_user_id: Some(auth.user.id),
  };

  session.store.save_app_key(key).await?;
  session.store.save_user_data(profile.clone()).await?;
  session.user = Some(profile);

  println!("Signed in as {email}.");

  // Bring the backend total up to date with whatever this machine has.
  // Failure here is reported, not fatal; `swot sync` retries it.
  let records = session.store.get_study_records().await?;
  let local_total = stats::total_time(&records);
  match remote
    .sync_total(&UserKey::AuthUser(auth.user.id), local_total, Utc::now())
    .await
  {
    Ok(outcome) => {
      println!("Study total: {}.", format_hours_minutes(outcome.final_total));
    }
    Err(e) => {
      tracing::warn!("post-login sync failed: {e}");
      println!("Could not sync the study total; run `swot sync` to retry.");
    }
  }

  Ok(())
}

pub async fn logout(session: &mut Session) -> Result<()> {
  session.logout().await?;
  println!("Signed out; all local data cleared.");
  Ok(())
}

pub async fn passwd(
  session: &Session,
  email: &str,
  current: &str,
  new_password: &str,
) -> Result<()> {
  validate_password(new_password)?;

  let remote = session.remote()?;
  // Re-authenticate with the current password; its token authorises the
  // change.
  let auth = remote
    .sign_in(email, current)
    .await
    .context("current password rejected")?;
  remote.update_password(&auth.access_token, new_password).await?;

  println!("Password changed.");
  Ok(())
}

// ─── Local views ──────────────────────────────────────────────────────────────

pub async fn records(session: &Session, study_type: Option<StudyType>) -> Result<()> {
  let records = match study_type {
    Some(t) => session.store.get_records_by_type(t).await?,
    None => session.store.get_study_records().await?,
  };

  if records.is_empty() {
    println!("No study records yet. `swot` opens the timer.");
    return Ok(());
  }

  for record in &records {
    println!(
      "{}  {:<8}  {:<16}  {:<13}  {} - {}",
      format_date(&record.start_time),
      format_hms(record.duration_secs),
      record.subject.label(),
      record.study_type.label(),
      format_time_of_day(&record.start_time),
      format_time_of_day(&record.end_time),
    );
  }
  println!(
    "{} session(s), {} total.",
    stats::session_count(&records),
    format_hours_minutes(stats::total_time(&records)),
  );
  Ok(())
}

pub async fn stats_view(session: &Session, study_type: Option<StudyType>) -> Result<()> {
  let all = session.store.get_study_records().await?;

  let types: &[StudyType] = match &study_type {
    Some(t) => std::slice::from_ref(t),
    None => &StudyType::ALL,
  };
  for t in types {
    let s = stats::type_stats(&all, *t);
    println!(
      "{:<14} {:>4} session(s)  {}",
      t.label(),
      s.sessions,
      format_hours_minutes(s.total_secs),
    );
  }

  // Subject breakdown over the selected slice.
  let slice: Vec<_> = match study_type {
    Some(t) => all.into_iter().filter(|r| r.study_type == t).collect(),
    None => all,
  };
  let shares = stats::subject_breakdown(&slice);
  if !shares.is_empty() {
    println!();
    for share in shares {
      println!(
        "  {:<18} {:>10}  {:>3}%",
        share.subject.label(),
        format_hours_minutes(share.total_secs),
        share.percent,
      );
    }
  }
  Ok(())
}

pub async fn report(
  session: &Session,
  study_type: StudyType,
  out: Option<PathBuf>,
) -> Result<()> {
  let records = session.store.get_records_by_type(study_type).await?;

  let today = Utc::now().date_naive();
  let file_name = swot_report::report_file_name(study_type, today);
  let path = out.unwrap_or_else(|| PathBuf::from(".")).join(&file_name);

  swot_report::render_report(&records, study_type, today, &path)
    .with_context(|| format!("generating the {} report", study_type.label()))?;

  println!("Wrote {}.", path.display());
  Ok(())
}

// ─── Remote commands ──────────────────────────────────────────────────────────

pub async fn sync(session: &Session) -> Result<()> {
  let remote = session.remote()?;
  let key = session.require_key().await?;

  let records = session.store.get_study_records().await?;
  let local_total = stats::total_time(&records);

  let outcome = remote.sync_total(&key, local_total, Utc::now()).await?;
  if outcome.pushed {
    println!(
      "Pushed {} to the backend.",
      format_hours_minutes(outcome.final_total)
    );
  } else {
    println!(
      "Already up to date at {}.",
      format_hours_minutes(outcome.final_total)
    );
  }
  Ok(())
}

pub async fn leaderboard(session: &Session) -> Result<()> {
  let remote = session.remote()?;
  let entries = remote.leaderboard().await?;

  if entries.is_empty() {
    println!("Nobody on the leaderboard yet.");
    return Ok(());
  }

  let own = session.user.as_ref().and_then(|u| u.username.as_deref());
  for (i, entry) in entries.iter().enumerate() {
    let marker = if own == Some(entry.username.as_str()) {
      "  (you)"
    } else {
      ""
    };
    println!(
      "{:>3}. {:<20} {}{marker}",
      i + 1,
      entry.username,
      format_hours_minutes(entry.total_study_time),
    );
  }
  Ok(())
}

pub async fn username(session: &mut Session, raw: &str) -> Result<()> {
  let name = sanitize_username(raw);
  validate_username(&name)?;

  // Re-claiming one's own name is a no-op, not a collision.
  if session.user.as_ref().and_then(|u| u.username.as_deref()) == Some(name.as_str()) {
    println!("`{name}` is already your username.");
    return Ok(());
  }

  let remote = session.remote()?;
  let key = session.require_key().await?;

  if remote.username_taken(&name).await? {
    bail!("username `{name}` is already taken");
  }
  remote.update_username(&key, &name).await?;

  if let Some(user) = &mut session.user {
    user.username = Some(name.clone());
    session.store.save_user_data(user.clone()).await?;
  }

  println!("Leaderboard username set to `{name}`.");
  Ok(())
}

pub async fn profile(
  session: &mut Session,
  name: Option<String>,
  class: Option<String>,
  state: Option<String>,
  city: Option<String>,
  phone: Option<String>,
) -> Result<()> {
  let update = ProfileUpdate { name, class, state, city, phone };

  let Some(user) = session.user.as_mut() else {
    bail!("no profile stored; run `swot signup` or `swot login` first");
  };

  if update.is_empty() {
    println!("{:<9} {}", "name", user.name);
    println!("{:<9} {}", "class", user.class);
    println!("{:<9} {}", "state", user.state);
    println!("{:<9} {}", "city", user.city);
    println!("{:<9} {}", "phone", user.phone);
    println!("{:<9} {}", "email", user.email);
    if let Some(username) = &user.username {
      println!("{:<9} {}", "username", username);
    }
    return Ok(());
  }

  // Merge the given fields over the stored profile and re-validate before
  // writing anything.
  if let Some(v) = &update.name {
    user.name = v.clone();
  }
  if let Some(v) = &update.class {
    user.class = v.clone();
  }
  if let Some(v) = &update.state {
    user.state = v.clone();
  }
  if let Some(v) = &update.city {
    user.city = v.clone();
  }
  if let Some(v) = &update.phone {
    user.phone = v.clone();
  }
  validate_profile(user)?;

  let snapshot = user.clone();
  session.store.save_user_data(snapshot).await?;

  // Mirror to the backend when signed in; the local write stands either way.
  match session.require_key().await {
    Ok(key) => {
      let remote = session.remote()?;
      remote.update_profile(&key, &update).await?;
      println!("Profile updated locally and on the backend.");
    }
    Err(_) => println!("Profile updated locally (not signed in)."),
  }
  Ok(())
}

pub async fn feedback(session: &Session, rating: u8, message: String) -> Result<()> {
  let remote = session.remote()?;

  let (name, email) = match &session.user {
    Some(user) => (Some(user.name.clone()), Some(user.email.clone())),
    None => (None, None),
  };
  let mut feedback = NewFeedback::new(name, email, rating, message)?;
  if let Some(user) = &session.user {
    feedback.user_id = user.auth_user_id;
    feedback.username = user.username.clone();
    feedback.phone = (!user.phone.is_empty()).then(|| user.phone.clone());
    feedback.state = (!user.state.is_empty()).then(|| user.state.clone());
    feedback.city = (!user.city.is_empty()).then(|| user.city.clone());
  }
  remote.submit_feedback(&feedback).await?;

  println!("Thanks for the feedback!");
  Ok(())
}
