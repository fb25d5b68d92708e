use std::collections::HashMap;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::time::Instant;

use super::BenchmarkConstant;

/// Keyed constant rows plus the instant they were last refreshed.
///
/// Starts empty; a refresh replaces the whole entry set.
#[derive(Debug)]
pub struct ConstantsCache {
    entries: HashMap<String, BenchmarkConstant>,
    refreshed_at: Option<Instant>,
    ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub entries: usize,
    pub age_secs: Option<u64>,
    pub ttl_secs: u64,
    pub fresh: bool,
}

impl ConstantsCache {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: HashMap::new(), refreshed_at: None, ttl }
    }

    pub fn is_fresh(&self) -> bool {
        self.refreshed_at.is_some_and(|at| at.elapsed() < self.ttl)
    }

    pub fn get(&self, key: &str) -> Option<&BenchmarkConstant> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkConstant> {
        self.entries.values()
    }

    /// Replace all entries with the rows effective today.
    pub fn replace(&mut self, rows: Vec<BenchmarkConstant>) {
        self.replace_as_of(rows, Utc::now().date_naive());
    }

    pub fn replace_as_of(&mut self, rows: Vec<BenchmarkConstant>, today: NaiveDate) {
        self.entries = rows
            .into_iter()
            .filter(|row| row.is_effective_on(today))
            .map(|row| (row.key.clone(), row))
            .collect();
        self.refreshed_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.refreshed_at = None;
    }

    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            entries: self.entries.len(),
            age_secs: self.refreshed_at.map(|at| at.elapsed().as_secs()),
            ttl_secs: self.ttl.as_secs(),
            fresh: self.is_fresh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let mut cache = ConstantsCache::new(Duration::from_secs(900));
        assert!(!cache.is_fresh());

        cache.replace(vec![BenchmarkConstant::numeric("k", "c", 1.0)]);
        assert!(cache.is_fresh());

        tokio::time::advance(Duration::from_secs(899)).await;
        assert!(cache.is_fresh());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!cache.is_fresh());
        assert_eq!(cache.status().age_secs, Some(900));
    }

    #[test]
    fn test_rows_outside_window_are_dropped() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let expired = BenchmarkConstant::numeric("old", "c", 1.0)
            .with_window(None, NaiveDate::from_ymd_opt(2025, 1, 1));
        let future = BenchmarkConstant::numeric("new", "c", 2.0)
            .with_window(NaiveDate::from_ymd_opt(2026, 1, 1), None);
        let current = BenchmarkConstant::numeric("now", "c", 3.0);

        let mut cache = ConstantsCache::new(Duration::from_secs(60));
        cache.replace_as_of(vec![expired, future, current], today);
        assert_eq!(cache.status().entries, 1);
        assert!(cache.get("now").is_some());
    }

    #[test]
    fn test_clear_resets_freshness() {
        let mut cache = ConstantsCache::new(Duration::from_secs(60));
        cache.replace(vec![BenchmarkConstant::numeric("k", "c", 1.0)]);
        cache.clear();
        assert!(!cache.is_fresh());
        assert!(cache.get("k").is_none());
    }
}
