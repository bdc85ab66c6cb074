//! Plain-text rendering of each tab.

use std::fmt::Write;

use pomodoro_core::timer::{CANCEL_LABEL, CONFIRM_LABEL, PROMPT, SKIP_LABEL};
use pomodoro_core::{Phase, TimerController};

use crate::shell::{SignInForm, Tab};

const HELP_TITLE: &str = "what is pomodoro?";

const HELP_TEXT: [&str; 2] = [
    "Pomodoro is a technique that helps you stay focused and productive by using timed work \
     sessions. Use the timer to work for 25 minutes, then take a 5-minute break. After four \
     sessions, take a longer break to recharge. It's a simple way to stay consistent, avoid \
     burnout, and make progress one step at a time.",
    "The Pomodoro Technique also emphasizes tracking each completed session, known as a \
     \"pomodoro,\" to build awareness of how you spend your time. This helps you estimate \
     workload more accurately and identify when you tend to lose focus. Between sessions, short \
     breaks are used to reset mentally without losing momentum, while longer breaks after \
     multiple cycles prevent cognitive fatigue. Many people adapt the method by adjusting \
     session length, break duration, or the number of cycles to match their personal rhythm. \
     The core principle remains the same: work in short, deliberate intervals with structured \
     recovery to maintain consistent, high-quality focus.",
];

pub const COMMANDS: &str = "\
commands:
  pomodoro | signin | help | stats   switch tab (or: tab <name>)
  start | pause | reset              timer controls
  set MM:SS                          edit the countdown while stopped, then start
  yes | no | skip                    answer the reset prompt / toggle \"don't show again\"
  login <username> <password>        sign in
  create-account                     create an account
  show                               redraw
  quit";

pub fn tab_bar(active: Tab) -> String {
    Tab::BAR
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[ {} ]", tab.label())
            } else {
                format!("  {}  ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The countdown line, also printed on every tick.
pub fn clock(ctl: &TimerController) -> String {
    let engine = ctl.engine();
    let status = match engine.phase() {
        Phase::Running => "running",
        Phase::Idle => "paused",
        Phase::Expired => "time's up",
    };
    format!("    {}    {status}", engine.display())
}

pub fn pomodoro(ctl: &TimerController) -> String {
    let mut out = String::new();
    let content = ctl.content();
    if !content.date.is_empty() {
        let _ = writeln!(out, "{}", content.date);
    }
    if !content.quote.is_empty() {
        let _ = writeln!(out, "\"{}\"", content.quote);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", clock(ctl));
    let _ = writeln!(out);

    let engine = ctl.engine();
    if engine.is_running() {
        let _ = writeln!(out, "  (reset)  (pause)");
    } else {
        let _ = writeln!(out, "  (start)   edit: set MM:SS");
    }

    if engine.pending_reset_confirmation() {
        let check = if engine.skip_reset_confirmation() { "x" } else { " " };
        let _ = writeln!(out);
        let _ = writeln!(out, "  (!) {PROMPT}");
        let _ = writeln!(out, "      [{CONFIRM_LABEL}]  [{CANCEL_LABEL}]");
        let _ = writeln!(out, "      [{check}] {SKIP_LABEL}  (skip)");
    }
    out
}

pub fn sign_in(form: &SignInForm) -> String {
    let username = if form.username.is_empty() { "username" } else { form.username.as_str() };
    let password = if form.password.is_empty() {
        "password".to_string()
    } else {
        "*".repeat(form.password.chars().count())
    };
    format!(
        "  {username}\n  {password}\n\n  (log in)   login <username> <password>\n  create account\n"
    )
}

pub fn help() -> String {
    let mut out = format!("{HELP_TITLE}\n\n");
    for paragraph in HELP_TEXT {
        let _ = writeln!(out, "{paragraph}\n");
    }
    out.push_str(COMMANDS);
    out.push('\n');
    out
}

pub fn stats(total_sessions: u64) -> String {
    format!("pomodoro stats\n\n  sessions completed: {total_sessions}\n")
}
