//! Where validation results go besides the caller: the audit log and alerts.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use super::ValidationResult;

#[derive(Debug, Error)]
pub enum SideEffectError {
    #[error("audit log write failed: {0}")]
    Audit(String),

    #[error("alert dispatch failed: {0}")]
    Alert(String),
}

/// One `calculation_audit_log` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub quote_id: Option<Uuid>,
    pub use_case: Option<String>,
    pub validation: ValidationResult,
    pub inputs: serde_json::Value,
    pub outputs: serde_json::Value,
    pub score: u8,
    pub warnings_count: usize,
    /// Benchmark table set the power estimate was computed against.
    pub benchmark_version: String,
    pub created_at: DateTime<Utc>,
}

/// Payload sent when a quote scores below the alert threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAlert {
    pub quote_id: Option<Uuid>,
    pub use_case: Option<String>,
    pub score: u8,
    pub threshold: u8,
    pub findings: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, entry: &AuditRecord) -> Result<(), SideEffectError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, alert: &QuoteAlert) -> Result<(), SideEffectError>;
}

#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn record(&self, entry: &AuditRecord) -> Result<(), SideEffectError> {
        self.records.lock().await.push(entry.clone());
        Ok(())
    }
}

/// Alerts go to the structured log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlertNotifier;

#[async_trait]
impl AlertNotifier for LogAlertNotifier {
    async fn notify(&self, alert: &QuoteAlert) -> Result<(), SideEffectError> {
        warn!(
            quote_id = ?alert.quote_id,
            use_case = alert.use_case.as_deref().unwrap_or("unknown"),
            score = alert.score,
            threshold = alert.threshold,
            findings = alert.findings.len(),
            "quote validation score below alert threshold"
        );
        Ok(())
    }
}

/// POSTs the alert as JSON to a webhook (Slack relay, ops inbox, ...).
#[derive(Clone)]
pub struct WebhookAlertNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookAlertNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("bess-quote-builder/0.3"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()?;
        Ok(Self { url: url.into(), client })
    }
}

#[async_trait]
impl AlertNotifier for WebhookAlertNotifier {
    async fn notify(&self, alert: &QuoteAlert) -> Result<(), SideEffectError> {
        let resp = self
            .client
            .post(&self.url)
            .json(alert)
            .send()
            .await
            .map_err(|e| SideEffectError::Alert(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SideEffectError::Alert(format!("webhook returned HTTP {status}")));
        }
        Ok(())
    }
}
