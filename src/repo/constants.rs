#![cfg(feature = "db")]

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use crate::constants::{BenchmarkConstant, ConstantsError, ConstantsSource};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConstantRow {
    pub key: String,
    pub category: String,
    pub value_numeric: Option<f64>,
    pub value_text: Option<String>,
    pub value_json: Option<serde_json::Value>,
    pub source: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
}

impl From<ConstantRow> for BenchmarkConstant {
    fn from(row: ConstantRow) -> Self {
        BenchmarkConstant {
            key: row.key,
            category: row.category,
            value_numeric: row.value_numeric,
            value_text: row.value_text,
            value_json: row.value_json,
            source: row.source,
            effective_date: row.effective_date,
            expiration_date: row.expiration_date,
        }
    }
}

/// `calculation_constants` table as a constants source.
#[derive(Clone)]
pub struct PgConstantsSource {
    pool: PgPool,
}

impl PgConstantsSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(e: sqlx::Error) -> ConstantsError {
    ConstantsError::Unavailable(e.to_string())
}

#[async_trait]
impl ConstantsSource for PgConstantsSource {
    async fn fetch_all(&self) -> Result<Vec<BenchmarkConstant>, ConstantsError> {
        let rows = sqlx::query_as::<_, ConstantRow>(
            r#"
            SELECT key, category, value_numeric, value_text, value_json,
                   source, effective_date, expiration_date
            FROM calculation_constants
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        debug!(rows = rows.len(), "loaded calculation constants");
        Ok(rows.into_iter().map(BenchmarkConstant::from).collect())
    }

    async fn upsert(&self, key: &str, value: f64) -> Result<(), ConstantsError> {
        let category = crate::constants::fallback::lookup(key).map_or("custom", |c| c.category);
        sqlx::query(
            r#"
            INSERT INTO calculation_constants (key, category, value_numeric, source, updated_at)
            VALUES ($1, $2, $3, 'admin', NOW())
            ON CONFLICT (key) DO UPDATE
            SET value_numeric = EXCLUDED.value_numeric,
                value_text = NULL,
                value_json = NULL,
                source = EXCLUDED.source,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(category)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(())
    }
}
