//! The editing session: one active date, its text, and everything derived
//! from it.
//!
//! The session is the only mutable context in the system. The presentation
//! layer feeds it raw text changes and clock readings; it owns the debounced
//! save, the per-session milestone set, navigation between days and the
//! rescue flow, and it publishes one-time [`SessionEvent`]s for display.

use crate::config::Config;
use crate::progress::{ProgramProgress, program_progress};
use crate::store::EntryStore;
use crate::streak::{current_streak, is_completed};
use crate::words::{DAILY_GOAL, MILESTONES, count_words};
use anyhow::Result;
use chrono::{DateTime, Duration, Local, NaiveDate};
use std::collections::HashSet;

/// Milliseconds of inactivity after which an edit is persisted.
pub const SAVE_DEBOUNCE_MS: i64 = 1000;

/// One-time notifications for the presentation layer to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A word-count threshold was crossed for the first time this session.
    Milestone { threshold: usize, message: String },
    /// The daily goal was reached; carries the freshly recomputed streak.
    GoalReached { streak: usize },
    /// A non-fatal problem. The session has already degraded (treated the
    /// entry as empty, or skipped the save) and keeps going.
    Warning(SessionWarning),
}

/// Non-critical issues surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionWarning {
    StorageUnavailable { operation: String, detail: String },
}

/// Issued by [`Session::begin_load`]. Applying it through
/// [`Session::complete_load`] only takes effect while no newer load has
/// started; stale tickets are discarded silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    date: NaiveDate,
    generation: u64,
}

/// One stored day, as listed in the history view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub word_count: usize,
    pub completed: bool,
}

#[derive(Debug)]
struct SessionStart {
    time: DateTime<Local>,
    /// Word count just before the first edit; session words are measured
    /// against this, not against zero.
    word_count: usize,
}

#[derive(Debug)]
struct PendingSave {
    due: DateTime<Local>,
}

pub struct Session {
    pub config: Config,
    store: EntryStore,
    active_date: NaiveDate,
    text: String,
    word_count: usize,
    milestones_reached: HashSet<usize>,
    session_start: Option<SessionStart>,
    pending_save: Option<PendingSave>,
    load_generation: u64,
    rescue_dismissed: bool,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Creates a session for today, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a session with a specific `Config`, bound to the config's
    /// reference date, and loads that day's entry.
    pub fn with_config(config: Config) -> Result<Self> {
        let store = EntryStore::new(config.journal_dir.clone())?;
        let today = config.reference_date;
        let mut session = Self {
            config,
            store,
            active_date: today,
            text: String::new(),
            word_count: 0,
            milestones_reached: HashSet::new(),
            session_start: None,
            pending_save: None,
            load_generation: 0,
            rescue_dismissed: false,
            events: Vec::new(),
        };
        let ticket = session.begin_load(today);
        session.complete_load(ticket);
        Ok(session)
    }

    pub fn today(&self) -> NaiveDate {
        self.config.reference_date
    }

    pub fn active_date(&self) -> NaiveDate {
        self.active_date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// The active day has reached the goal. Presentational only.
    pub fn is_done(&self) -> bool {
        self.word_count >= DAILY_GOAL
    }

    /// Starts loading `date`: binds it as the active date and clears the
    /// stale text so a slow load never shows the previous day's content
    /// under the new date's header.
    ///
    /// The returned ticket must be passed to [`complete_load`]. A second
    /// `begin_load` before that invalidates the first ticket
    /// (last-requested-date wins).
    ///
    /// [`complete_load`]: Session::complete_load
    pub fn begin_load(&mut self, date: NaiveDate) -> LoadTicket {
        self.load_generation += 1;
        self.active_date = date;
        self.text.clear();
        self.word_count = 0;
        self.milestones_reached.clear();
        self.session_start = None;
        self.pending_save = None;
        LoadTicket {
            date,
            generation: self.load_generation,
        }
    }

    /// Applies the result of a load, unless the ticket went stale.
    pub fn complete_load(&mut self, ticket: LoadTicket) {
        if ticket.generation != self.load_generation {
            // A newer navigation already won; drop this one silently.
            return;
        }
        let content = match self.store.get_entry(ticket.date) {
            Ok(content) => content,
            Err(e) => {
                self.warn("load", &e);
                String::new()
            }
        };
        self.text = content;
        self.word_count = count_words(&self.text);
        // Anything the stored content already implies must not fire again
        // when this day is reloaded.
        self.milestones_reached = MILESTONES
            .iter()
            .copied()
            .filter(|&m| self.word_count >= m)
            .collect();
        self.session_start = None;
    }

    /// Navigates to `date`. Selecting the already-active date is a no-op.
    /// Any pending save for the old date is written first, so no edit is
    /// lost to the debounce window.
    pub fn select_date(&mut self, date: NaiveDate) {
        if date == self.active_date {
            return;
        }
        self.flush();
        let ticket = self.begin_load(date);
        self.complete_load(ticket);
    }

    /// Handles a text change from the editor surface.
    ///
    /// Recounts words, records the session start on the first non-empty
    /// text, reschedules the debounced save (the previous deadline is
    /// superseded and will never write), and runs the milestone check.
    pub fn on_text_change(&mut self, new_text: &str, now: DateTime<Local>) {
        let previous_count = self.word_count;
        self.text = new_text.to_string();
        self.word_count = count_words(&self.text);

        if self.session_start.is_none() && !self.text.trim().is_empty() {
            self.session_start = Some(SessionStart {
                time: now,
                word_count: previous_count,
            });
        }

        self.pending_save = Some(PendingSave {
            due: now + Duration::milliseconds(SAVE_DEBOUNCE_MS),
        });

        self.check_milestones();
    }

    /// Timer pump. Fires the pending save once its deadline has passed,
    /// always writing the text as it is *now*, so the latest edit wins even
    /// if deadlines were rescheduled in between.
    pub fn tick(&mut self, now: DateTime<Local>) {
        if let Some(pending) = &self.pending_save {
            if now >= pending.due {
                self.pending_save = None;
                self.persist();
            }
        }
    }

    /// Persists the active entry immediately if a save is pending.
    pub fn flush(&mut self) {
        if self.pending_save.take().is_some() {
            self.persist();
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save_entry(self.active_date, &self.text) {
            self.warn("save", &e);
        }
    }

    fn check_milestones(&mut self) {
        for threshold in MILESTONES {
            if self.word_count >= threshold && self.milestones_reached.insert(threshold) {
                self.events.push(SessionEvent::Milestone {
                    threshold,
                    message: milestone_message(threshold),
                });
                if threshold == DAILY_GOAL {
                    // Persist before recomputing so the streak engine sees
                    // the completed entry instead of a pre-debounce copy.
                    self.pending_save = None;
                    self.persist();
                    let streak = self.streak();
                    self.events.push(SessionEvent::GoalReached { streak });
                }
            }
        }
    }

    /// Current streak, recomputed from stored history on every call.
    pub fn streak(&self) -> usize {
        current_streak(&self.store, self.today())
    }

    /// Whether the rescue prompt should be offered: yesterday is incomplete
    /// (including never written) and the prompt was not yet answered this
    /// launch. Nothing is persisted; the prompt returns next launch if
    /// yesterday is still incomplete.
    pub fn rescue_available(&self) -> bool {
        if self.rescue_dismissed {
            return false;
        }
        let yesterday = self.today() - Duration::days(1);
        !is_completed(&self.store, yesterday)
    }

    /// Accepts the rescue: navigates to yesterday so the user can finish it.
    pub fn accept_rescue(&mut self) {
        let yesterday = self.today() - Duration::days(1);
        self.rescue_dismissed = true;
        self.select_date(yesterday);
    }

    /// Declines the rescue for this launch only.
    pub fn decline_rescue(&mut self) {
        self.rescue_dismissed = true;
    }

    /// Words written this session (since the first edit after load).
    pub fn session_words(&self) -> usize {
        match &self.session_start {
            Some(start) => self.word_count.saturating_sub(start.word_count),
            None => 0,
        }
    }

    /// Words per minute for this editing session, 0 before the first edit.
    pub fn words_per_minute(&self, now: DateTime<Local>) -> usize {
        let Some(start) = &self.session_start else {
            return 0;
        };
        let minutes = (now - start.time).num_seconds() as f64 / 60.0;
        if minutes <= 0.0 {
            return 0;
        }
        (self.session_words() as f64 / minutes).round() as usize
    }

    /// Time elapsed since the first edit of this session.
    pub fn session_elapsed(&self, now: DateTime<Local>) -> Option<Duration> {
        self.session_start.as_ref().map(|start| now - start.time)
    }

    /// Every stored day with its word count and completion, oldest first.
    ///
    /// An unreadable record counts as empty and queues a warning; the
    /// listing itself never fails.
    pub fn history(&mut self) -> Vec<HistoryEntry> {
        let dates = match self.store.list_dates() {
            Ok(dates) => dates,
            Err(e) => {
                self.warn("list", &e);
                return Vec::new();
            }
        };
        let mut out = Vec::new();
        for date in dates {
            let word_count = match self.store.get_entry(date) {
                Ok(content) => count_words(&content),
                Err(e) => {
                    self.warn("read", &e);
                    0
                }
            };
            out.push(HistoryEntry {
                date,
                word_count,
                completed: word_count >= DAILY_GOAL,
            });
        }
        out
    }

    /// Week/day since the first-ever entry, if the user has ever saved one.
    pub fn program_progress(&self) -> Option<ProgramProgress> {
        let first = self.store.first_entry_date().ok().flatten()?;
        Some(program_progress(first, self.today()))
    }

    /// Drains the queued one-time events.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn warn(&mut self, operation: &str, error: &anyhow::Error) {
        self.events
            .push(SessionEvent::Warning(SessionWarning::StorageUnavailable {
                operation: operation.to_string(),
                detail: format!("{error:#}"),
            }));
    }
}

fn milestone_message(threshold: usize) -> String {
    // 250 words is one "page" of morning pages.
    match threshold {
        250 => "One page down, two to go.".to_string(),
        500 => "Two pages done. One more.".to_string(),
        750 => "750 words. Done for the day.".to_string(),
        other => format!("{other} words."),
    }
}
