use std::collections::HashMap;

use regex::RegexBuilder;

use crate::core::candidates::CandidateSet;

pub const DEFAULT_MAX_RESULTS: usize = 6;

/// Memo from query text to its result set. Dropped wholesale whenever the
/// candidate set changes; matching stays correct without it.
#[derive(Debug, Clone, Default)]
struct MatchCache {
    results: HashMap<String, Vec<String>>,
}

impl MatchCache {
    fn get(&self, query: &str) -> Option<Vec<String>> {
        self.results.get(query).cloned()
    }

    fn insert(&mut self, query: String, results: Vec<String>) {
        self.results.insert(query, results);
    }

    fn clear(&mut self) {
        self.results.clear();
    }
}

/// Case-insensitive prefix matcher over a [`CandidateSet`].
///
/// For a non-empty query, returns the candidates whose lowercase form starts
/// with the lowercase query, minus any candidate byte-equal to the query,
/// sorted by code-point order and capped at `max_results`.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    candidates: CandidateSet,
    cache: MatchCache,
    max_results: usize,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self {
            candidates: CandidateSet::new(),
            cache: MatchCache::default(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Caps result sets at `max_results`; 0 falls back to the default.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.set_max_results(max_results);
        self
    }

    pub fn set_max_results(&mut self, max_results: usize) {
        let max_results = if max_results == 0 {
            DEFAULT_MAX_RESULTS
        } else {
            max_results
        };
        if max_results != self.max_results {
            self.max_results = max_results;
            self.cache.clear();
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn set_candidates(&mut self, values: impl IntoIterator<Item = String>) {
        self.candidates.replace(values);
        self.cache.clear();
    }

    /// Appends values not already present; the cache survives a no-op add.
    pub fn add_candidates(&mut self, values: impl IntoIterator<Item = String>) -> usize {
        let added = self.candidates.add(values);
        if added > 0 {
            self.cache.clear();
        }
        added
    }

    /// Removes present values; the cache survives a no-op remove.
    pub fn remove_candidates<S: AsRef<str>>(
        &mut self,
        values: impl IntoIterator<Item = S>,
    ) -> usize {
        let removed = self.candidates.remove(values);
        if removed > 0 {
            self.cache.clear();
        }
        removed
    }

    /// Result set for `query`. Never null: an empty query or a query with no
    /// prefix matches yields an empty vec.
    pub fn matches(&mut self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        if let Some(hit) = self.cache.get(query) {
            return hit;
        }
        let results = self.scan(query);
        self.cache.insert(query.to_owned(), results.clone());
        results
    }

    fn scan(&self, query: &str) -> Vec<String> {
        // Escaping keeps metacharacters in the query literal.
        let pattern = format!("^{}", regex::escape(query));
        let Ok(prefix) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
            return Vec::new();
        };

        let mut results: Vec<String> = self
            .candidates
            .iter()
            .filter(|candidate| *candidate != query && prefix.is_match(candidate))
            .map(str::to_owned)
            .collect();
        results.sort_unstable();
        results.truncate(self.max_results);
        results
    }
}
