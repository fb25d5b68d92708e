//! Calculation constants: administrator-managed reference numbers with a
//! client-side TTL cache and a compiled-in fallback table.

pub mod cache;
pub mod fallback;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

pub use cache::{CacheStatus, ConstantsCache};
pub use fallback::{CalculationConstants, FALLBACK_CONSTANTS};
pub use service::{ConstantsService, DEFAULT_CACHE_TTL};

#[derive(Debug, Error)]
pub enum ConstantsError {
    #[error("constants source unavailable: {0}")]
    Unavailable(String),

    #[error("unknown constant: {0}")]
    UnknownKey(String),

    #[error("constant {key} has an invalid value: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// One row of the `calculation_constants` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkConstant {
    pub key: String,
    pub category: String,
    #[serde(default)]
    pub value_numeric: Option<f64>,
    #[serde(default)]
    pub value_text: Option<String>,
    #[serde(default)]
    pub value_json: Option<serde_json::Value>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
}

impl BenchmarkConstant {
    pub fn numeric(key: impl Into<String>, category: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            category: category.into(),
            value_numeric: Some(value),
            value_text: None,
            value_json: None,
            source: None,
            effective_date: None,
            expiration_date: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_window(mut self, effective: Option<NaiveDate>, expiration: Option<NaiveDate>) -> Self {
        self.effective_date = effective;
        self.expiration_date = expiration;
        self
    }

    /// Numeric value, falling back to a number stored as text or bare JSON.
    pub fn as_number(&self) -> Option<f64> {
        self.value_numeric
            .or_else(|| self.value_text.as_deref().and_then(|s| s.trim().parse().ok()))
            .or_else(|| self.value_json.as_ref().and_then(serde_json::Value::as_f64))
            .filter(|v| v.is_finite())
    }

    /// Whether `date` falls inside `[effective_date, expiration_date)`.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_date.map_or(true, |from| from <= date) && self.expiration_date.map_or(true, |until| date < until)
    }
}

/// Backing store for constants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConstantsSource: Send + Sync {
    /// Every constant row, regardless of effective window.
    async fn fetch_all(&self) -> Result<Vec<BenchmarkConstant>, ConstantsError>;

    /// Set the numeric value for `key`, creating the row when it does not exist.
    async fn upsert(&self, key: &str, value: f64) -> Result<(), ConstantsError>;
}

/// In-process source, seeded from the fallback table by default.
#[derive(Debug, Default)]
pub struct MemoryConstantsSource {
    rows: RwLock<Vec<BenchmarkConstant>>,
}

impl MemoryConstantsSource {
    pub fn new(rows: Vec<BenchmarkConstant>) -> Self {
        Self { rows: RwLock::new(rows) }
    }

    pub fn seeded() -> Self {
        Self::new(
            FALLBACK_CONSTANTS
                .iter()
                .map(|c| BenchmarkConstant::numeric(c.key, c.category, c.value).with_source("seed"))
                .collect(),
        )
    }
}

#[async_trait]
impl ConstantsSource for MemoryConstantsSource {
    async fn fetch_all(&self) -> Result<Vec<BenchmarkConstant>, ConstantsError> {
        Ok(self.rows.read().await.clone())
    }

    async fn upsert(&self, key: &str, value: f64) -> Result<(), ConstantsError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.key == key) {
            Some(row) => {
                row.value_numeric = Some(value);
                row.value_text = None;
                row.value_json = None;
                row.source = Some("admin".to_string());
            }
            None => {
                let category = fallback::lookup(key).map_or("custom", |c| c.category);
                rows.push(BenchmarkConstant::numeric(key, category, value).with_source("admin"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_effective_window_is_half_open() {
        let c = BenchmarkConstant::numeric("k", "c", 1.0).with_window(Some(date(2025, 1, 1)), Some(date(2026, 1, 1)));
        assert!(!c.is_effective_on(date(2024, 12, 31)));
        assert!(c.is_effective_on(date(2025, 1, 1)));
        assert!(c.is_effective_on(date(2025, 12, 31)));
        assert!(!c.is_effective_on(date(2026, 1, 1)));
    }

    #[test]
    fn test_number_from_text_or_json() {
        let mut c = BenchmarkConstant::numeric("k", "c", 0.0);
        c.value_numeric = None;
        c.value_text = Some(" 0.35 ".into());
        assert_eq!(c.as_number(), Some(0.35));

        c.value_text = None;
        c.value_json = Some(serde_json::json!(42));
        assert_eq!(c.as_number(), Some(42.0));
    }

    #[tokio::test]
    async fn test_memory_source_upsert() {
        let source = MemoryConstantsSource::seeded();
        source.upsert("battery_cost_per_kwh", 300.0).await.unwrap();
        source.upsert("new_key", 1.5).await.unwrap();

        let rows = source.fetch_all().await.unwrap();
        let battery = rows.iter().find(|r| r.key == "battery_cost_per_kwh").unwrap();
        assert_eq!(battery.value_numeric, Some(300.0));
        assert_eq!(battery.source.as_deref(), Some("admin"));
        assert!(rows.iter().any(|r| r.key == "new_key" && r.category == "custom"));
    }
}
