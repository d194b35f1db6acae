use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Maximum number of queries retained per profile.
pub const HISTORY_CAPACITY: usize = 100;

/// Bounded, most-recent-first list of raw query strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHistory {
    queries: VecDeque<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from most-recent-first queries, keeping the newest
    /// `HISTORY_CAPACITY`.
    pub fn from_queries<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queries = queries
            .into_iter()
            .map(Into::into)
            .take(HISTORY_CAPACITY)
            .collect();
        Self { queries }
    }

    /// Records a query as the most recent entry, evicting the oldest when full.
    pub fn record(&mut self, query: &str) {
        self.queries.push_front(query.to_string());
        self.queries.truncate(HISTORY_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Queries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(String::as_str)
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.queries.front().map(String::as_str)
    }

    /// Occurrence count per case-folded, trimmed query.
    pub fn query_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for query in &self.queries {
            let key = query.trim().to_lowercase();
            if !key.is_empty() {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_most_recent_first() {
        let mut history = SearchHistory::new();
        history.record("kayak");
        history.record("paddle");

        let queries: Vec<&str> = history.iter().collect();
        assert_eq!(queries, vec!["paddle", "kayak"]);
        assert_eq!(history.most_recent(), Some("paddle"));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = SearchHistory::new();
        for i in 0..(HISTORY_CAPACITY + 5) {
            history.record(&format!("q{i}"));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.most_recent(), Some("q104"));
        assert!(!history.iter().any(|q| q == "q0"));
    }

    #[test]
    fn test_from_queries_truncates() {
        let history = SearchHistory::from_queries((0..150).map(|i| format!("q{i}")));
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.most_recent(), Some("q0"));
    }

    #[test]
    fn test_query_counts_fold_case() {
        let history = SearchHistory::from_queries(["Fish", "fish ", "lake", "  "]);
        let counts = history.query_counts();

        assert_eq!(counts.get("fish"), Some(&2));
        assert_eq!(counts.get("lake"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
