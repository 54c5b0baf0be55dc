use super::theme::OneDark;
use pages_core::HistoryEntry;
use pages_core::progress::ProgramProgress;
use chrono::{Duration, NaiveDate};
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%A, %d %b %Y".to_string(),
                    use_color: true,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_warning(&self, message: &str) {
        eprintln!("pages: warning: {message}");
    }

    /// Three segments of goal/3 words, the "three pages" of morning pages.
    pub fn print_progress(&self, current: usize, goal: usize) {
        let segment = goal / 3;
        const CELLS: usize = 8;
        let mut parts = Vec::new();
        for s in 0..3 {
            let start = s * segment;
            let filled = current.saturating_sub(start).min(segment);
            let full = filled * CELLS / segment;
            let mut bar = format!("{}{}", "█".repeat(full), "·".repeat(CELLS - full));
            if self.opts.use_color {
                bar = if filled >= segment {
                    bar.with(Color::Green).to_string()
                } else {
                    bar.with(Color::Yellow).to_string()
                };
            }
            parts.push(bar);
        }
        println!("{}", parts.join(" "));
    }

    pub fn print_stats(
        &self,
        word_count: usize,
        streak: usize,
        progress: Option<ProgramProgress>,
        words_per_minute: usize,
        elapsed: Option<Duration>,
    ) {
        let mut line = format!("{word_count} words • streak: {streak}");
        if words_per_minute > 0 {
            line.push_str(&format!(" • {words_per_minute} wpm"));
        }
        if let Some(elapsed) = elapsed {
            let total = elapsed.num_seconds().max(0);
            line.push_str(&format!(" • {}:{:02}", total / 60, total % 60));
        }
        if let Some(p) = progress {
            line.push_str(&format!(" • week {}, day {}", p.week, p.day));
        }
        if self.opts.use_color {
            println!("{}", line.with(Color::DarkGrey));
        } else {
            println!("{line}");
        }
    }

    pub fn print_done(&self, streak: usize) {
        self.print_md(&format!(
            "# Done for the day. Come back tomorrow.\nStreak: **{streak}** days\n"
        ));
    }

    pub fn print_history(&self, entries: &[HistoryEntry], active_date: NaiveDate) {
        if entries.is_empty() {
            self.print_info("No past pages.");
            return;
        }
        for entry in entries {
            let mut date = entry.date.format(&self.opts.date_format).to_string();
            let mut count = format!("{} words", entry.word_count);
            let mark = if entry.completed { "✓" } else { " " };
            let active = if entry.date == active_date { " ←" } else { "" };
            if self.opts.use_color {
                date = date.with(Color::Cyan).to_string();
                count = if entry.completed {
                    count.with(Color::Green).to_string()
                } else {
                    count.with(Color::DarkGrey).to_string()
                };
            }
            println!("{mark} {date} - {count}{active}");
        }
    }
}
