//! TUI rendering for the timer screen.

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use swot_core::format::{format_date, format_hms};

use crate::app::TimerApp;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &TimerApp) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = format_date(&Local::now());

  let left = Span::styled(
    " swot  [s/space] start/stop  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &TimerApp) {
  let running = app.timer.is_running();

  let border_style = if running {
    Style::default().fg(Color::Green)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(" Timer ")
    .borders(Borders::ALL)
    .border_style(border_style);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let clock_style = if running {
    Style::default()
      .fg(Color::Green)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().add_modifier(Modifier::BOLD)
  };
  let state = if running {
    Span::styled("RUNNING", Style::default().fg(Color::Green))
  } else {
    Span::styled("STOPPED", Style::default().fg(Color::DarkGray))
  };

  let lines = vec![
    Line::from(""),
    Line::from(Span::styled(
      format_hms(app.timer.elapsed_secs()),
      clock_style,
    )),
    Line::from(state),
    Line::from(""),
    Line::from(format!(
      "Type: {}   Subject: {}",
      app.timer.study_type().label(),
      app.timer.subject().label(),
    )),
    Line::from(Span::styled(
      format!("{} saved this session", app.saved_this_session),
      Style::default().fg(Color::DarkGray),
    )),
  ];

  f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &TimerApp) {
  let running = app.timer.is_running();
  let (mode_label, hints) = if running {
    ("RUNNING", "s/space stop and save  q quit (discards the run)")
  } else {
    ("IDLE", "s/space start  Tab subject  t type  q quit")
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(if running { Color::Green } else { Color::Cyan })
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
