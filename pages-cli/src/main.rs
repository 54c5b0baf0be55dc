mod render;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use pages_core::{
    Session, SessionEvent, SessionWarning,
    dates::resolve_date_input,
    words::DAILY_GOAL,
};
use render::{ColorMode, RenderOptions, Renderer};
use std::io::{self, IsTerminal, Write};
use std::{
    fs,
    process::{Command, ExitCode},
};

/// pages — 750 words of morning pages a day
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Prints the journal root directory
    #[arg(long, short, exclusive = true)]
    path: bool,
    /// Edit the pages of a specific day (e.g., `pages --on yesterday`, `pages --on 2025-08-14`)
    #[arg(long)]
    on: Option<String>,
    /// Show today's word count, progress and streak without editing.
    #[arg(long, short, conflicts_with_all = ["history", "on", "text"])]
    stats: bool,
    /// List every saved day with its word count.
    #[arg(long, conflicts_with_all = ["on", "text"])]
    history: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
    /// Free text appended to the day's pages without opening an editor
    /// (e.g., `pages Slept badly, writing anyway.`).
    #[arg()]
    text: Vec<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pages: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut session = Session::new()?;

    let use_color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                false
            } else {
                io::stdout().is_terminal()
            }
        }
    };
    let renderer = Renderer::new(Some(RenderOptions {
        date_format: session.config.date_format.to_string(),
        use_color,
    }));

    if cli.path {
        renderer.print_info(&format!("{}", session.config.journal_dir.display()));
        return Ok(());
    }

    if cli.stats {
        return stats_mode(&renderer, &session);
    }

    if cli.history {
        return history_mode(&renderer, &mut session);
    }

    // Navigation: an explicit --on skips the rescue prompt.
    if let Some(date_str) = cli.on.as_deref() {
        let Some(date) = resolve_date_input(date_str, session.today()) else {
            anyhow::bail!(
                "'{date_str}' is not a date I understand (try 'today', 'yesterday' or YYYY-MM-DD)"
            );
        };
        session.select_date(date);
    } else if session.rescue_available() && io::stdin().is_terminal() {
        offer_rescue(&renderer, &mut session)?;
    }

    if !cli.text.is_empty() {
        // Inline append mode.
        let addition = cli.text.join(" ");
        let mut text = session.text().to_string();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&addition);
        session.on_text_change(&text, Local::now());
    } else {
        // Editor mode (default).
        let editor = resolve_editor(&session);
        let header = session
            .active_date()
            .format(&session.config.date_format)
            .to_string();
        renderer.print_info(&format!("Morning pages for {header}"));
        let input = edit_in_buffer(&editor, session.text())?;
        session.on_text_change(&input, Local::now());
    }
    session.flush();

    report(&renderer, &mut session);
    Ok(())
}

/// Prints the one-time events the session queued, then the progress line.
fn report(renderer: &Renderer, session: &mut Session) {
    let now = Local::now();
    print_events(renderer, session.take_events());
    renderer.print_progress(session.word_count(), DAILY_GOAL);
    renderer.print_stats(
        session.word_count(),
        session.streak(),
        session.program_progress(),
        session.words_per_minute(now),
        session.session_elapsed(now),
    );
}

fn print_events(renderer: &Renderer, events: Vec<SessionEvent>) {
    for event in events {
        match event {
            SessionEvent::Milestone { message, .. } => renderer.print_info(&message),
            SessionEvent::GoalReached { streak } => renderer.print_done(streak),
            SessionEvent::Warning(SessionWarning::StorageUnavailable { operation, detail }) => {
                renderer.print_warning(&format!("could not {operation} the entry: {detail}"));
            }
        }
    }
}

fn stats_mode(renderer: &Renderer, session: &Session) -> Result<()> {
    renderer.print_progress(session.word_count(), DAILY_GOAL);
    renderer.print_stats(
        session.word_count(),
        session.streak(),
        session.program_progress(),
        0,
        None,
    );
    if session.is_done() {
        renderer.print_done(session.streak());
    }
    Ok(())
}

fn history_mode(renderer: &Renderer, session: &mut Session) -> Result<()> {
    let history = session.history();
    print_events(renderer, session.take_events());
    renderer.print_history(&history, session.active_date());
    Ok(())
}

fn offer_rescue(renderer: &Renderer, session: &mut Session) -> Result<()> {
    renderer.print_info(
        "You missed yesterday's pages. Complete them now to keep your streak alive?",
    );
    print!("Do yesterday's pages? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    if answer.trim().eq_ignore_ascii_case("y") {
        session.accept_rescue();
    } else {
        session.decline_rescue();
    }
    Ok(())
}

fn resolve_editor(session: &Session) -> String {
    session
        .config
        .editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Opens `editor_cmd` on a temp buffer prefilled with `initial`, returning
/// the buffer content after the editor exits.
fn edit_in_buffer(editor_cmd: &str, initial: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("pages")
        .suffix(".md")
        .tempfile()?;

    let path = file.path().to_path_buf();
    fs::write(&path, initial)?;
    let status = Command::new(editor_cmd).arg(&path).status()?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(fs::read_to_string(&path)?)
}
