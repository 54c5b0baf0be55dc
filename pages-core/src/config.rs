use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::keywords::Keywords;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute directory where daily entry files live.
    pub journal_dir: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Display format for day headers. Default is "%A, %d %b %Y".
    pub date_format: String,
    /// The calendar day treated as "today" by every date decision.
    /// Defaults to the local date at load time; tests pin it to a fixed day.
    pub reference_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    journal_dir: Option<PathBuf>,
    editor: Option<String>,
    date_format: Option<String>,
    /// Optional table:
    /// [synonyms]
    /// ytd = "yesterday"
    /// ayer = "yesterday"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_default();

        let date_format = file_config
            .date_format
            .unwrap_or_else(|| "%A, %d %b %Y".to_string());

        let journal_dir = file_config
            .journal_dir
            .unwrap_or_else(Self::default_journal_dir);

        // Extend global keyword registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Ok(Self {
            journal_dir,
            editor: file_config.editor,
            date_format,
            reference_date: Local::now().date_naive(),
        })
    }

    /// Default journal root: `{data_dir}/pages`
    /// - macOS:   `~/Library/Application Support/pages`
    /// - Linux:   `$XDG_DATA_HOME/pages` or `~/.local/share/pages`
    /// - Windows: `%APPDATA%\pages`
    fn default_journal_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("pages");
            p
        } else {
            PathBuf::from("./pages")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("pages")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("pages").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    /// Omits synonyms that collide with a canonical keyword (eg. "today").
    /// Lowercases both alias and target for case-insensitive behavior.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Keywords::is_canonical(&alias.to_ascii_lowercase()))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Keywords::extend(&pairs);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::{Keyword, Keywords};
    use std::path::Path;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("pages")
                .join("config.toml");
            let expected_native = b.config_dir().join("pages").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_journal_dir_and_editor() {
        let toml = r#"
            journal_dir = "/tmp/my-pages"
            editor = "hx"
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(fc.journal_dir.as_deref(), Some(Path::new("/tmp/my-pages")));
        assert_eq!(fc.editor.as_deref(), Some("hx"));
        assert!(fc.date_format.is_none());
    }

    #[test]
    fn parse_file_accepts_synonyms_and_extends_registry() {
        let toml = r#"
            journal_dir = "/tmp/my-pages"

            [synonyms]
            ytd = "yesterday"
            AYER = "yesterday"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        super::Config::load_synonyms(&fc.synonyms);

        assert!(Keywords::matches(Keyword::Yesterday, "ytd"));
        assert!(Keywords::matches(Keyword::Yesterday, "ayer"));
    }

    #[test]
    fn parse_file_does_not_accept_canonical_synonyms() {
        let toml = r#"
            journal_dir = "/tmp/my-pages"

            [synonyms]
            today = "yesterday"
            ytd = "yesterday"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        super::Config::load_synonyms(&fc.synonyms);

        assert!(!Keywords::matches(Keyword::Yesterday, "today"));
        assert!(Keywords::matches(Keyword::Yesterday, "ytd"));
    }

    #[test]
    fn case_variant_canonical_synonyms_are_rejected() {
        let toml = r#"
            [synonyms]
            Today = "yesterday"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        super::Config::load_synonyms(&fc.synonyms);

        // `today` must keep resolving to today, whatever the config says.
        assert!(Keywords::matches(Keyword::Today, "today"));
        assert!(!Keywords::matches(Keyword::Yesterday, "today"));
    }
}
