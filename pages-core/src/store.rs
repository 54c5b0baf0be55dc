//! The entry store: one plain-text record per calendar day.
//!
//! Records live as `morning_page_YYYY-MM-DD.toml` files under the journal
//! directory. The `morning_page_` namespace is an implementation detail of
//! this module and never leaks to callers, who deal in dates only.

use crate::dates::{date_key, parse_date_key};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "morning_page_";

#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    content: String,
    /// Epoch milliseconds of the last write. Informational only; never used
    /// for ordering.
    last_updated: i64,
}

/// Persists and retrieves daily entries, keyed by calendar date.
#[derive(Debug, Clone)]
pub struct EntryStore {
    root: PathBuf,
}

impl EntryStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root).with_context(|| format!("creating {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(format!("{FILE_PREFIX}{}.toml", date_key(date)))
    }

    /// Upserts the entry for `date`, overwriting any previous content and
    /// refreshing `last_updated`.
    ///
    /// The record is written to a temp file and renamed into place, so a
    /// concurrent read never observes a partial record.
    pub fn save_entry(&self, date: NaiveDate, content: &str) -> Result<()> {
        let record = EntryRecord {
            content: content.to_string(),
            last_updated: Utc::now().timestamp_millis(),
        };
        let body = toml::to_string(&record).context("serializing entry record")?;
        let path = self.entry_path(date);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("moving entry into place at {}", path.display()))?;
        Ok(())
    }

    /// Returns the stored content for `date`, or an empty string when no
    /// entry exists.
    ///
    /// Absence and an explicitly saved empty entry are indistinguishable at
    /// this interface; the streak engine relies on that simplification.
    pub fn get_entry(&self, date: NaiveDate) -> Result<String> {
        let path = self.entry_path(date);
        if !path.exists() {
            return Ok(String::new());
        }
        let s = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let record: EntryRecord =
            toml::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
        Ok(record.content)
    }

    /// Every date that has ever been saved, sorted ascending.
    ///
    /// Callers may only rely on set semantics; the sort is a convenience.
    pub fn list_dates(&self) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        let dir = fs::read_dir(&self.root)
            .with_context(|| format!("reading directory {}", self.root.display()))?;
        for entry in dir {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(key) = name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(".toml"))
            else {
                continue;
            };
            if let Some(date) = parse_date_key(key) {
                dates.push(date);
            }
        }
        dates.sort();
        Ok(dates)
    }

    /// The first day the user ever saved, if any. Anchors program progress.
    pub fn first_entry_date(&self) -> Result<Option<NaiveDate>> {
        Ok(self.list_dates()?.into_iter().next())
    }
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

    #[test]
    fn absent_entry_reads_as_empty() {
        let (store, _tmp) = mk_store();
        assert_eq!(store.get_entry(d(2024, 1, 1)).unwrap(), "");
    }

    #[test]
    fn save_then_get_round_trips() {
        let (store, _tmp) = mk_store();
        let date = d(2024, 1, 1);
        store.save_entry(date, "first draft").unwrap();
        assert_eq!(store.get_entry(date).unwrap(), "first draft");
    }

    #[test]
    fn last_write_wins() {
        let (store, _tmp) = mk_store();
        let date = d(2024, 1, 1);
        store.save_entry(date, "first").unwrap();
        store.save_entry(date, "second").unwrap();
        store.save_entry(date, "third").unwrap();
        assert_eq!(store.get_entry(date).unwrap(), "third");
    }

    #[test]
    fn multiline_content_survives() {
        let (store, _tmp) = mk_store();
        let date = d(2024, 1, 1);
        let content = "line one\n\nline three, with \"quotes\" and unicode: déjà vu";
        store.save_entry(date, content).unwrap();
        assert_eq!(store.get_entry(date).unwrap(), content);
    }

    #[test]
    fn empty_write_still_creates_the_day() {
        let (store, _tmp) = mk_store();
        let date = d(2024, 1, 1);
        store.save_entry(date, "").unwrap();
        // The interface reports empty either way, but the day now exists.
        assert_eq!(store.get_entry(date).unwrap(), "");
        assert_eq!(store.list_dates().unwrap(), vec![date]);
    }

    #[test]
    fn list_dates_is_sorted_and_complete() {
        let (store, _tmp) = mk_store();
        store.save_entry(d(2024, 3, 5), "c").unwrap();
        store.save_entry(d(2024, 1, 9), "a").unwrap();
        store.save_entry(d(2024, 2, 1), "b").unwrap();
        assert_eq!(
            store.list_dates().unwrap(),
            vec![d(2024, 1, 9), d(2024, 2, 1), d(2024, 3, 5)]
        );
        assert_eq!(store.first_entry_date().unwrap(), Some(d(2024, 1, 9)));
    }

    #[test]
    fn foreign_files_are_ignored() {
        let (store, _tmp) = mk_store();
        store.save_entry(d(2024, 1, 1), "mine").unwrap();
        fs::write(store.root().join("notes.txt"), "not an entry").unwrap();
        fs::write(store.root().join("morning_page_garbage.toml"), "x").unwrap();
        assert_eq!(store.list_dates().unwrap(), vec![d(2024, 1, 1)]);
    }

    #[test]
    fn empty_store_has_no_first_date() {
        let (store, _tmp) = mk_store();
        assert_eq!(store.first_entry_date().unwrap(), None);
    }
}
