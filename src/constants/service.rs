use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::cache::{CacheStatus, ConstantsCache};
use super::fallback::{self, CalculationConstants, FALLBACK_CONSTANTS};
use super::{ConstantsError, ConstantsSource};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Read-mostly access to calculation constants.
///
/// Reads never fail: a source error or a missing key falls back to the
/// compiled-in table. A refresh holds the cache write lock from fetch to
/// fill, so concurrent misses share one fetch and [`clear_cache`] cannot be
/// overtaken by a fill that started before it.
///
/// [`clear_cache`]: ConstantsService::clear_cache
pub struct ConstantsService {
    source: Arc<dyn ConstantsSource>,
    cache: RwLock<ConstantsCache>,
}

impl ConstantsService {
    pub fn new(source: Arc<dyn ConstantsSource>, ttl: Duration) -> Self {
        Self { source, cache: RwLock::new(ConstantsCache::new(ttl)) }
    }

    /// Run `f` against a fresh cache, or `None` when the source is unreachable.
    async fn with_live<T>(&self, f: impl FnOnce(&ConstantsCache) -> T) -> Option<T> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh() {
                return Some(f(&cache));
            }
        }

        let mut cache = self.cache.write().await;
        if cache.is_fresh() {
            return Some(f(&cache));
        }
        match self.source.fetch_all().await {
            Ok(rows) => {
                cache.replace(rows);
                debug!(entries = cache.status().entries, "constants cache refreshed from source");
                Some(f(&cache))
            }
            Err(e) => {
                debug!(error = %e, "constants source unavailable, using fallback table");
                None
            }
        }
    }

    /// Live value for `key`, else the fallback value, else `None` for unknown keys.
    pub async fn get_constant(&self, key: &str) -> Option<f64> {
        let live = self
            .with_live(|cache| cache.get(key).and_then(|c| c.as_number()))
            .await
            .flatten();
        match live {
            Some(v) => Some(v),
            None => {
                let fallback = fallback::value(key);
                debug!(key, found = fallback.is_some(), "constant resolved from fallback table");
                fallback
            }
        }
    }

    /// All constants in `category`, live values layered over the fallback table.
    pub async fn get_constants_by_category(&self, category: &str) -> BTreeMap<String, f64> {
        self.layered(Some(category)).await
    }

    /// Every known constant, live values layered over the fallback table.
    pub async fn get_all_constants(&self) -> BTreeMap<String, f64> {
        self.layered(None).await
    }

    async fn layered(&self, category: Option<&str>) -> BTreeMap<String, f64> {
        let wanted = |c: &str| category.map_or(true, |want| want == c);
        let mut out: BTreeMap<String, f64> = FALLBACK_CONSTANTS
            .iter()
            .filter(|c| wanted(c.category))
            .map(|c| (c.key.to_string(), c.value))
            .collect();

        let live: Vec<(String, f64)> = self
            .with_live(|cache| {
                cache
                    .iter()
                    .filter(|c| wanted(&c.category))
                    .filter_map(|c| c.as_number().map(|v| (c.key.clone(), v)))
                    .collect()
            })
            .await
            .unwrap_or_default();
        out.extend(live);
        out
    }

    /// The full typed constant set, resolved from a single cache snapshot.
    pub async fn get_calculation_constants(&self) -> CalculationConstants {
        let live: BTreeMap<String, f64> = self
            .with_live(|cache| {
                cache
                    .iter()
                    .filter_map(|c| c.as_number().map(|v| (c.key.clone(), v)))
                    .collect()
            })
            .await
            .unwrap_or_default();
        CalculationConstants::from_lookup(|key| live.get(key).copied())
    }

    /// Write through to the source and invalidate the cache.
    pub async fn update_constant(&self, key: &str, value: f64) -> Result<(), ConstantsError> {
        if !value.is_finite() {
            return Err(ConstantsError::InvalidValue {
                key: key.to_string(),
                reason: format!("{value} is not a finite number"),
            });
        }
        self.source.upsert(key, value).await?;
        self.clear_cache().await;
        info!(key, value, "calculation constant updated");
        Ok(())
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    pub async fn cache_status(&self) -> CacheStatus {
        self.cache.read().await.status()
    }

    /// Round-trip to the source, bypassing the cache. Used by health checks.
    pub async fn check_source(&self) -> Result<usize, ConstantsError> {
        self.source.fetch_all().await.map(|rows| rows.len())
    }
}
