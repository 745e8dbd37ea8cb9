//! Process-lifetime registries of discovered movies
//!
//! Two independent maps are kept: `movie_urls` (id → display name) and
//! `movie_info` (display name → record). They are never persisted; the output
//! sink receives each record as it is produced.

use crate::movie::MovieRecord;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct MovieRegistry {
    movie_urls: HashMap<String, String>,
    movie_info: HashMap<String, MovieRecord>,
}

impl MovieRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a display name that is not yet taken in `movie_info`
    ///
    /// Collisions try `"<base> (1)"`, `"<base> (2)"`, ... against the original
    /// base name until one is free.
    pub fn unique_name(&self, base: &str) -> String {
        if !self.movie_info.contains_key(base) {
            return base.to_string();
        }

        let mut suffix = 1u32;
        loop {
            let candidate = format!("{} ({})", base, suffix);
            if !self.movie_info.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Records `id → display name`, warning if the id was already known by another name
    pub fn register_identity(&mut self, id: &str, name: &str) {
        if let Some(previous) = self.movie_urls.insert(id.to_string(), name.to_string()) {
            if previous != name {
                tracing::warn!(
                    "Movie id '{}' seen under two names: '{}' and '{}'",
                    id,
                    previous,
                    name
                );
            }
        }
    }

    /// Stores a finished record under its display name
    pub fn insert_record(&mut self, record: MovieRecord) {
        self.movie_info.insert(record.name.clone(), record);
    }

    pub fn name_for_id(&self, id: &str) -> Option<&str> {
        self.movie_urls.get(id).map(String::as_str)
    }

    pub fn record(&self, name: &str) -> Option<&MovieRecord> {
        self.movie_info.get(name)
    }

    pub fn identity_count(&self) -> usize {
        self.movie_urls.len()
    }

    pub fn record_count(&self) -> usize {
        self.movie_info.len()
    }

    /// Display names that more than one id maps to, sorted
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for name in self.movie_urls.values() {
            *counts.entry(name.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name.to_string())
            .collect()
    }
}
