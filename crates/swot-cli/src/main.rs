//! `swot` — study-session timer and tracker.
//!
//! # Usage
//!
//! ```
//! swot                                # open the timer UI
//! swot timer -t lecture-study -s maths
//! swot stats                          # totals per study type and subject
//! swot report -t self-study           # write a PDF report
//! swot sync                           # reconcile the total with the backend
//! ```

mod app;
mod commands;
mod config;
mod session;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::TimerApp;
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use swot_core::{
  record::{StudyType, Subject},
  user::UserData,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "swot", version, about = "Study-session timer and tracker")]
struct Args {
  /// Path to a TOML config file (default: ~/.config/swot/config.toml).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Path to the SQLite database (overrides the config file).
  #[arg(long, value_name = "FILE")]
  db: Option<PathBuf>,

  /// Supabase project URL (overrides the config file).
  #[arg(long, value_name = "URL")]
  supabase_url: Option<String>,

  /// Supabase anon key (overrides the config file).
  #[arg(long, value_name = "KEY")]
  supabase_anon_key: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Open the interactive timer (the default).
  Timer {
    /// Study type to start on.
    #[arg(short = 't', long, default_value = "self-study")]
    study_type: StudyType,

    /// Subject to start on.
    #[arg(short = 's', long, default_value = "physics")]
    subject: Subject,
  },

  /// Create an account, claim an access key, and store it locally.
  Signup {
    #[arg(long)]
    name: String,
    #[arg(long)]
    class: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    city: String,
    /// 10-digit phone number.
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
  },

  /// Sign in on this machine and restore the profile from the backend.
  Login {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
  },

  /// Clear all local data: profile, access key, and study records.
  Logout,

  /// List stored study records, most recent first.
  Records {
    /// Only records of this study type.
    #[arg(short = 't', long)]
    study_type: Option<StudyType>,
  },

  /// Aggregate totals per study type and subject.
  Stats {
    /// Only this study type.
    #[arg(short = 't', long)]
    study_type: Option<StudyType>,
  },

  /// Write a PDF report of one study type's records.
  Report {
    #[arg(short = 't', long, default_value = "self-study")]
    study_type: StudyType,

    /// Directory to write the report into (default: current directory).
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,
  },

  /// Reconcile the local study total with the backend.
  Sync,

  /// Show the public leaderboard (top 50 named users).
  Leaderboard,

  /// Claim or change the leaderboard username.
  Username { name: String },

  /// Show the stored profile, or update the given fields.
  Profile {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    class: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    phone: Option<String>,
  },

  /// Change the account password.
  Passwd {
    #[arg(long)]
    email: String,
    /// Current password, used to re-authenticate.
    #[arg(long)]
    current: String,
    #[arg(long = "new")]
    new_password: String,
  },

  /// Send feedback to the developers.
  Feedback {
    /// Rating from 1 to 5.
    #[arg(short, long)]
    rating: u8,
    message: String,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Log to stderr so the TUI and command output own stdout.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();
  let cfg = config::load(&args)?;
  let mut session = Session::init(cfg).await?;

  match args.command.unwrap_or(Command::Timer {
    study_type: StudyType::SelfStudy,
    subject:    Subject::Physics,
  }) {
    Command::Timer { study_type, subject } => {
      run_timer(&session, study_type, subject).await
    }
    Command::Signup { name, class, state, city, phone, email, password } => {
      let profile = UserData { name, class, state, city, phone, email, ..UserData::default() };
      commands::signup(&mut session, profile, &password).await
    }
    Command::Login { email, password } => {
      commands::login(&mut session, &email, &password).await
    }
    Command::Logout => commands::logout(&mut session).await,
    Command::Records { study_type } => commands::records(&session, study_type).await,
    Command::Stats { study_type } => commands::stats_view(&session, study_type).await,
    Command::Report { study_type, out } => {
      commands::report(&session, study_type, out).await
    }
    Command::Sync => commands::sync(&session).await,
    Command::Leaderboard => commands::leaderboard(&session).await,
    Command::Username { name } => commands::username(&mut session, &name).await,
    Command::Profile { name, class, state, city, phone } => {
      commands::profile(&mut session, name, class, state, city, phone).await
    }
    Command::Passwd { email, current, new_password } => {
      commands::passwd(&session, &email, &current, &new_password).await
    }
    Command::Feedback { rating, message } => {
      commands::feedback(&session, rating, message).await
    }
  }
}

// ─── Timer UI ─────────────────────────────────────────────────────────────────

async fn run_timer(
  session: &Session,
  study_type: StudyType,
  subject: Subject,
) -> Result<()> {
  let mut app = TimerApp::new(session.store.clone(), study_type, subject);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  if app.timer.is_running() {
    println!("Run in progress discarded; only stopped runs are saved.");
  }
  if app.saved_this_session > 0 {
    println!(
      "Saved {} study session(s). `swot stats` shows the totals.",
      app.saved_this_session
    );
  }

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut TimerApp,
) -> Result<()> {
  loop {
    app.tick();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting. The poll
    // interval bounds how stale the clock display can get.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(250))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
