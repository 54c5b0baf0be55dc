//! Streak derivation.
//!
//! The streak is recomputed from stored entries on every query instead of
//! being kept as a counter. A cached counter can drift when past entries are
//! edited after the fact; a backward scan over ground truth cannot, and it is
//! bounded by the days the user has actually been writing.

use crate::store::EntryStore;
use crate::words::{DAILY_GOAL, count_words};
use chrono::{Duration, NaiveDate};

/// Whether `date` has a completed entry (word count >= the daily goal).
///
/// A failed read counts as not completed: streaks degrade, they never crash.
pub fn is_completed(store: &EntryStore, date: NaiveDate) -> bool {
    store
        .get_entry(date)
        .map(|content| count_words(&content) >= DAILY_GOAL)
        .unwrap_or(false)
}

/// Consecutive completed days ending at `today`, walking backward.
///
/// An incomplete `today` does not break the streak; the user may still be
/// writing. The scan continues from yesterday either way and stops at the
/// first incomplete day.
pub fn current_streak(store: &EntryStore, today: NaiveDate) -> usize {
    let mut streak = 0;
    if is_completed(store, today) {
        streak += 1;
    }
    let mut check = today - Duration::days(1);
    while is_completed(store, check) {
        streak += 1;
        check -= Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn mk_store() -> (EntryStore, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let store = EntryStore::new(tmp.path().join("pages")).unwrap();
        (store, tmp)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn complete(store: &EntryStore, date: NaiveDate) {
        store.save_entry(date, &"word ".repeat(DAILY_GOAL)).unwrap();
    }

    #[test]
    fn no_entries_means_zero() {
        let (store, _tmp) = mk_store();
        assert_eq!(current_streak(&store, d(2024, 1, 7)), 0);
    }

    #[test]
    fn short_entries_do_not_complete_a_day() {
        let (store, _tmp) = mk_store();
        store.save_entry(d(2024, 1, 7), "a few words only").unwrap();
        assert!(!is_completed(&store, d(2024, 1, 7)));
        assert_eq!(current_streak(&store, d(2024, 1, 7)), 0);
    }

    #[test]
    fn gap_resets_the_scan() {
        let (store, _tmp) = mk_store();
        for day in 1..=5 {
            complete(&store, d(2024, 1, day));
        }
        // gap on the 6th
        complete(&store, d(2024, 1, 7));

        assert_eq!(current_streak(&store, d(2024, 1, 7)), 1);
    }

    #[test]
    fn incomplete_today_still_counts_from_yesterday() {
        let (store, _tmp) = mk_store();
        for day in 1..=5 {
            complete(&store, d(2024, 1, day));
        }

        // Nothing written on the 6th yet; the run through the 5th survives.
        assert_eq!(current_streak(&store, d(2024, 1, 6)), 5);
    }

    #[test]
    fn completed_today_extends_the_run() {
        let (store, _tmp) = mk_store();
        for day in 1..=5 {
            complete(&store, d(2024, 1, day));
        }
        assert_eq!(current_streak(&store, d(2024, 1, 5)), 5);
    }

    #[test]
    fn gap_immediately_before_today_means_zero() {
        let (store, _tmp) = mk_store();
        complete(&store, d(2024, 1, 1));
        // 2nd and 3rd missing, "today" is the 3rd
        assert_eq!(current_streak(&store, d(2024, 1, 3)), 0);
    }

    #[test]
    fn editing_a_past_entry_down_shrinks_the_streak() {
        let (store, _tmp) = mk_store();
        for day in 1..=3 {
            complete(&store, d(2024, 1, day));
        }
        assert_eq!(current_streak(&store, d(2024, 1, 3)), 3);

        // Recomputation tracks ground truth, not a stale counter.
        store.save_entry(d(2024, 1, 2), "trimmed down").unwrap();
        assert_eq!(current_streak(&store, d(2024, 1, 3)), 1);
    }
}
