#![cfg(feature = "db")]

use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::audit::PgAuditLog;
use super::constants::PgConstantsSource;

pub struct PgRepo {
    pub pool: PgPool,
}

impl PgRepo {
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    pub fn constants(&self) -> PgConstantsSource {
        PgConstantsSource::new(self.pool.clone())
    }

    pub fn audit_log(&self) -> PgAuditLog {
        PgAuditLog::new(self.pool.clone())
    }
}
