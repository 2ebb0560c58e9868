use crate::domain::market::Lang;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const FAVORITES_KEY: &str = "kobot-favorites";
pub const LANG_KEY: &str = "kobot-lang";

/// Key-value persistence for favorites, language and cache entries: one JSON
/// file per fixed key under a data directory (the browser localStorage
/// analog). Reads treat missing or corrupt files as absent; writes go through
/// a temp file and rename so a crash never leaves a half-written value.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        let raw = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding corrupt store entry");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let path = self.path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let json = serde_json::to_vec(value).context("failed to serialize store entry")?;
        std::fs::write(&tmp, json)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }

    /// Persistence must never break a refresh cycle; failures are logged.
    pub fn set_best_effort<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = self.set(key, value) {
            tracing::warn!(key, error = %err, "failed to persist store entry");
        }
    }

    // Favorites: a persisted set of ticker strings, independent of any fetch.

    pub fn favorites(&self) -> BTreeSet<String> {
        self.get(FAVORITES_KEY).unwrap_or_default()
    }

    pub fn is_favorite(&self, ticker: &str) -> bool {
        self.favorites().contains(ticker)
    }

    /// Returns whether the ticker is a favorite after the toggle.
    pub fn toggle_favorite(&self, ticker: &str) -> anyhow::Result<bool> {
        let mut favorites = self.favorites();
        let now_on = if !favorites.remove(ticker) {
            favorites.insert(ticker.to_string());
            true
        } else {
            false
        };
        self.set(FAVORITES_KEY, &favorites)?;
        Ok(now_on)
    }

    pub fn lang(&self) -> Option<Lang> {
        self.get(LANG_KEY)
    }

    pub fn set_lang(&self, lang: Lang) {
        self.set_best_effort(LANG_KEY, &lang);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_store;
    use super::*;

    #[test]
    fn get_returns_none_for_missing_and_corrupt_entries() {
        let store = temp_store("store-missing");
        assert_eq!(store.get::<Vec<String>>("nope"), None);

        std::fs::write(store.dir().join("bad.json"), b"{not json").unwrap();
        assert_eq!(store.get::<Vec<String>>("bad"), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = temp_store("store-roundtrip");
        store.set("numbers", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(store.get::<Vec<u32>>("numbers"), Some(vec![1, 2, 3]));

        // Overwrite replaces the previous value.
        store.set("numbers", &vec![9u32]).unwrap();
        assert_eq!(store.get::<Vec<u32>>("numbers"), Some(vec![9]));
    }

    #[test]
    fn favorites_toggle_round_trips() {
        let store = temp_store("store-favs");
        assert!(store.favorites().is_empty());

        assert!(store.toggle_favorite("AAPL").unwrap());
        assert!(store.is_favorite("AAPL"));

        // A second store over the same dir sees the persisted set.
        let reopened = LocalStore::open(store.dir()).unwrap();
        assert!(reopened.is_favorite("AAPL"));

        assert!(!store.toggle_favorite("AAPL").unwrap());
        assert!(!store.is_favorite("AAPL"));
    }

    #[test]
    fn lang_persists() {
        let store = temp_store("store-lang");
        assert_eq!(store.lang(), None);
        store.set_lang(Lang::Ja);
        assert_eq!(store.lang(), Some(Lang::Ja));
    }
}
