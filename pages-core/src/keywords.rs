use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    Today,
    Yesterday,
}

pub struct Keywords;

impl Keywords {
    /// Returns the global keyword registry (input → canonical).
    ///
    /// Initialized once on first access, thread-safe behind an [`RwLock`],
    /// all keys stored lowercased for case-insensitive lookups.
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let mut m = HashMap::new();
            m.insert("today".to_string(), Keyword::Today);
            m.insert("yesterday".to_string(), Keyword::Yesterday);
            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined synonyms.
    ///
    /// Each pair is `(alias, target)`. The `target` must already be known to
    /// the registry (a canonical keyword or an existing synonym); unknown
    /// targets are ignored silently. Keys are lowercased so lookups stay
    /// case-insensitive, and an alias that lowercases to a canonical keyword
    /// is refused so seeded mappings can never be overwritten.
    ///
    /// Typical call site: `Config::load()`, after reading `[synonyms]` from
    /// `config.toml`:
    ///
    /// ```toml
    /// [synonyms]
    /// ytd  = "yesterday"
    /// ayer = "yesterday"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = Self::registry().write().unwrap();
        for (alias, target) in synonyms {
            let alias = alias.to_ascii_lowercase();
            if Self::is_canonical(&alias) {
                continue;
            }
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.insert(alias, canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical keyword (eg "today").
    pub fn is_canonical(word: &str) -> bool {
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Returns `true` if `input` equals (case-insensitively) the given
    /// canonical keyword or any of its registered synonyms.
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        let reg = Self::registry().read().unwrap();
        reg.get(&input.to_ascii_lowercase())
            .map(|&canon| canon == keyword)
            .unwrap_or(false)
    }
}
