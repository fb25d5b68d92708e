use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use crate::config::{Config, ConstantsBackend};
use crate::constants::{ConstantsSource, MemoryConstantsSource};
use crate::validator::{AuditLog, MemoryAuditLog};

/// Backing stores selected by configuration.
pub struct Repositories {
    pub constants: Arc<dyn ConstantsSource>,
    pub audit_log: Arc<dyn AuditLog>,
}

impl Repositories {
    pub async fn new(cfg: &Config) -> Result<Self> {
        match cfg.constants.source {
            ConstantsBackend::Memory => {
                info!("using in-memory constants and audit log");
                Ok(Self::in_memory())
            }
            ConstantsBackend::Postgres => Self::postgres(cfg).await,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            constants: Arc::new(MemoryConstantsSource::seeded()),
            audit_log: Arc::new(MemoryAuditLog::new()),
        }
    }

    #[cfg(feature = "db")]
    async fn postgres(cfg: &Config) -> Result<Self> {
        let Some(url) = cfg.db.url.as_deref() else {
            bail!("constants.source = \"postgres\" requires db.url");
        };
        let repo = pg::PgRepo::connect(url).await?;
        info!("using postgres constants and audit log");
        Ok(Self {
            constants: Arc::new(repo.constants()),
            audit_log: Arc::new(repo.audit_log()),
        })
    }

    #[cfg(not(feature = "db"))]
    async fn postgres(_cfg: &Config) -> Result<Self> {
        bail!("constants.source = \"postgres\" requires building with the `db` feature");
    }
}

#[cfg(feature = "db")]
pub mod audit;
#[cfg(feature = "db")]
pub mod constants;
#[cfg(feature = "db")]
pub mod pg;
