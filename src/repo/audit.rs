#![cfg(feature = "db")]

use async_trait::async_trait;
use sqlx::PgPool;

use crate::validator::{AuditLog, AuditRecord, SideEffectError};

/// Append-only `calculation_audit_log` writer.
#[derive(Clone)]
pub struct PgAuditLog {
    pool: PgPool,
}

impl PgAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for PgAuditLog {
    async fn record(&self, entry: &AuditRecord) -> Result<(), SideEffectError> {
        let validation =
            serde_json::to_value(&entry.validation).map_err(|e| SideEffectError::Audit(e.to_string()))?;
        sqlx::query(
            r#"
            INSERT INTO calculation_audit_log
                (quote_id, use_case, validation_result, inputs, outputs, score, warnings_count, benchmark_version, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.quote_id)
        .bind(entry.use_case.as_deref())
        .bind(validation)
        .bind(&entry.inputs)
        .bind(&entry.outputs)
        .bind(i16::from(entry.score))
        .bind(entry.warnings_count as i32)
        .bind(&entry.benchmark_version)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SideEffectError::Audit(e.to_string()))?;
        Ok(())
    }
}
