//! Calculation validator: re-checks a finished quote against industry
//! benchmarks, scores it, and hands audit/alert work to a background task.

pub mod checks;
pub mod sinks;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::power::benchmarks::BENCHMARK_VERSION;
use crate::quote::{QuoteInputs, QuoteResult};
pub use checks::{CheckKind, CheckOutcome, ExpectedRange, Severity, ValidationWarning};
pub use sinks::{
    AlertNotifier, AuditLog, AuditRecord, LogAlertNotifier, MemoryAuditLog, QuoteAlert, SideEffectError,
    WebhookAlertNotifier,
};

pub const DEFAULT_ALERT_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub score: u8,
    pub warnings: Vec<ValidationWarning>,
    pub checks_performed: u32,
    pub checks_passed: u32,
    pub timestamp: DateTime<Utc>,
}

impl ValidationResult {
    pub fn count(&self, severity: Severity) -> usize {
        self.warnings.iter().filter(|w| w.severity == severity).count()
    }
}

/// 100 minus 25 per error, 10 per warning, 2 per info, floored at 0.
pub fn score(warnings: &[ValidationWarning]) -> u8 {
    let deduction: i64 = warnings
        .iter()
        .map(|w| match w.severity {
            Severity::Error => 25,
            Severity::Warning => 10,
            Severity::Info => 2,
        })
        .sum();
    (100 - deduction).clamp(0, 100) as u8
}

/// Run every check and score the result. Pure; no side effects.
pub fn evaluate(quote: &QuoteResult, inputs: &QuoteInputs) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut performed = 0;
    let mut passed = 0;
    for outcome in checks::run_all(quote, inputs) {
        match outcome {
            CheckOutcome::Skipped => {}
            CheckOutcome::Passed => {
                performed += 1;
                passed += 1;
            }
            CheckOutcome::Flagged(w) => {
                performed += 1;
                // Infos are advisory; the check still counts as passed.
                if w.severity == Severity::Info {
                    passed += 1;
                }
                warnings.push(w);
            }
        }
    }

    let score = score(&warnings);
    ValidationResult {
        is_valid: !warnings.iter().any(|w| w.severity == Severity::Error),
        score,
        warnings,
        checks_performed: performed,
        checks_passed: passed,
        timestamp: Utc::now(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    pub log_to_database: bool,
    pub alert_threshold: u8,
    pub quote_id: Option<Uuid>,
    pub use_case: Option<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self { log_to_database: false, alert_threshold: DEFAULT_ALERT_THRESHOLD, quote_id: None, use_case: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum SideEffectStatus {
    Skipped,
    Completed,
    Failed(String),
}

impl SideEffectStatus {
    fn from_result(result: Result<(), SideEffectError>) -> Self {
        match result {
            Ok(()) => SideEffectStatus::Completed,
            Err(e) => {
                warn!(error = %e, "validation side effect failed");
                SideEffectStatus::Failed(e.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideEffectReport {
    pub audit: SideEffectStatus,
    pub alert: SideEffectStatus,
}

impl SideEffectReport {
    pub fn skipped() -> Self {
        Self { audit: SideEffectStatus::Skipped, alert: SideEffectStatus::Skipped }
    }
}

/// Handle to the background audit/alert task. Awaiting it yields the report;
/// dropping it lets the task finish detached.
#[derive(Debug)]
pub struct SideEffectHandle {
    task: Option<JoinHandle<SideEffectReport>>,
}

impl SideEffectHandle {
    fn none() -> Self {
        Self { task: None }
    }
}

impl Future for SideEffectHandle {
    type Output = SideEffectReport;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.task.as_mut() {
            None => Poll::Ready(SideEffectReport::skipped()),
            Some(task) => Pin::new(task).poll(cx).map(|joined| {
                joined.unwrap_or_else(|e| {
                    warn!(error = %e, "validation side-effect task did not complete");
                    let reason = format!("side-effect task aborted: {e}");
                    SideEffectReport {
                        audit: SideEffectStatus::Failed(reason.clone()),
                        alert: SideEffectStatus::Failed(reason),
                    }
                })
            }),
        }
    }
}

/// A computed validation plus the still-running side effects.
#[derive(Debug)]
pub struct ValidatedQuote {
    pub result: ValidationResult,
    pub side_effects: SideEffectHandle,
}

#[derive(Clone, Default)]
pub struct QuoteValidator {
    audit_log: Option<Arc<dyn AuditLog>>,
    notifier: Option<Arc<dyn AlertNotifier>>,
}

impl QuoteValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audit_log(mut self, audit_log: Arc<dyn AuditLog>) -> Self {
        self.audit_log = Some(audit_log);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn AlertNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Validate a quote. The result is available immediately; audit and alert
    /// writes run on a spawned task and can never change it.
    pub async fn validate_quote(
        &self,
        quote: &QuoteResult,
        inputs: &QuoteInputs,
        options: ValidationOptions,
    ) -> ValidatedQuote {
        let result = evaluate(quote, inputs);
        debug!(
            score = result.score,
            is_valid = result.is_valid,
            warnings = result.warnings.len(),
            "quote validated"
        );

        let audit = self.audit_log.clone().filter(|_| options.log_to_database).map(|log| {
            let entry = AuditRecord {
                quote_id: options.quote_id,
                use_case: options.use_case.clone(),
                validation: result.clone(),
                inputs: serde_json::to_value(inputs).unwrap_or_default(),
                outputs: serde_json::to_value(quote).unwrap_or_default(),
                score: result.score,
                warnings_count: result.warnings.len(),
                benchmark_version: BENCHMARK_VERSION.to_string(),
                created_at: result.timestamp,
            };
            (log, entry)
        });

        let alert = self.notifier.clone().filter(|_| result.score < options.alert_threshold).map(|notifier| {
            let alert = QuoteAlert {
                quote_id: options.quote_id,
                use_case: options.use_case.clone(),
                score: result.score,
                threshold: options.alert_threshold,
                findings: result
                    .warnings
                    .iter()
                    .filter(|w| w.severity != Severity::Info)
                    .map(|w| w.message.clone())
                    .collect(),
                timestamp: result.timestamp,
            };
            (notifier, alert)
        });

        if audit.is_none() && alert.is_none() {
            return ValidatedQuote { result, side_effects: SideEffectHandle::none() };
        }

        let task = tokio::spawn(async move {
            let audit = match audit {
                Some((log, entry)) => SideEffectStatus::from_result(log.record(&entry).await),
                None => SideEffectStatus::Skipped,
            };
            let alert = match alert {
                Some((notifier, alert)) => SideEffectStatus::from_result(notifier.notify(&alert).await),
                None => SideEffectStatus::Skipped,
            };
            SideEffectReport { audit, alert }
        });

        ValidatedQuote { result, side_effects: SideEffectHandle { task: Some(task) } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CalculationConstants;
    use crate::quote::calculate_quote;
    use sinks::{MockAlertNotifier, MockAuditLog};

    fn warning(severity: Severity) -> ValidationWarning {
        ValidationWarning {
            check: CheckKind::BatteryCostPerKwh,
            severity,
            message: String::new(),
            actual: 0.0,
            expected_range: ExpectedRange { min: 0.0, max: 1.0 },
            benchmark: String::new(),
        }
    }

    fn sample(k: CalculationConstants) -> (QuoteResult, QuoteInputs) {
        let inputs = QuoteInputs {
            storage_size_mw: 1.0,
            duration_hours: 4.0,
            solar_mw: 0.0,
            benchmark_peak_mw: None,
            use_case: Some("office".into()),
        };
        (calculate_quote(&inputs, &k), inputs)
    }

    /// Demand charge raised so payback stays inside the ideal band.
    fn high_battery_cost() -> CalculationConstants {
        CalculationConstants {
            battery_cost_per_kwh: 720.0,
            demand_charge_per_kw_month: 20.0,
            ..CalculationConstants::default()
        }
    }

    #[test]
    fn test_score_one_error_one_warning() {
        assert_eq!(score(&[warning(Severity::Error), warning(Severity::Warning)]), 65);
    }

    #[test]
    fn test_score_floors_at_zero() {
        assert_eq!(score(&vec![warning(Severity::Error); 5]), 0);
        assert_eq!(score(&[]), 100);
        assert_eq!(score(&[warning(Severity::Info)]), 98);
    }

    #[test]
    fn test_evaluate_one_error_one_warning_is_invalid() {
        // $720/kWh battery is an error; the resulting $909/kWh total is a deviation warning.
        let k = high_battery_cost();
        let (q, i) = sample(k);
        let result = evaluate(&q, &i);
        assert_eq!(result.count(Severity::Error), 1);
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.score, 65);
        assert!(!result.is_valid);
        assert_eq!(result.checks_performed, 5);
    }

    #[tokio::test]
    async fn test_clean_quote_spawns_nothing() {
        let (q, i) = sample(CalculationConstants::default());
        let validated = QuoteValidator::new().validate_quote(&q, &i, ValidationOptions::default()).await;
        assert_eq!(validated.result.score, 100);
        assert!(validated.result.is_valid);
        assert_eq!(validated.side_effects.await, SideEffectReport::skipped());
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_change_result() {
        let mut audit = MockAuditLog::new();
        audit
            .expect_record()
            .times(1)
            .returning(|_| Err(SideEffectError::Audit("connection reset".into())));
        let validator = QuoteValidator::new().with_audit_log(Arc::new(audit));

        let (q, i) = sample(CalculationConstants::default());
        let options = ValidationOptions { log_to_database: true, ..ValidationOptions::default() };
        let validated = validator.validate_quote(&q, &i, options).await;
        assert!(validated.result.is_valid);

        let report = validated.side_effects.await;
        assert!(matches!(report.audit, SideEffectStatus::Failed(ref r) if r.contains("connection reset")));
        assert_eq!(report.alert, SideEffectStatus::Skipped);
    }

    #[tokio::test]
    async fn test_low_score_dispatches_alert() {
        let mut notifier = MockAlertNotifier::new();
        notifier
            .expect_notify()
            .withf(|alert| alert.score == 65 && alert.findings.len() == 2)
            .times(1)
            .returning(|_| Ok(()));
        let validator = QuoteValidator::new().with_notifier(Arc::new(notifier));

        let (q, i) = sample(high_battery_cost());
        let report = validator.validate_quote(&q, &i, ValidationOptions::default()).await.side_effects.await;
        assert_eq!(report.alert, SideEffectStatus::Completed);
        assert_eq!(report.audit, SideEffectStatus::Skipped);
    }

    #[tokio::test]
    async fn test_audit_records_to_memory_log() {
        let log = Arc::new(MemoryAuditLog::new());
        let validator = QuoteValidator::new().with_audit_log(log.clone());
        let (q, i) = sample(CalculationConstants::default());
        let quote_id = Uuid::new_v4();
        let options = ValidationOptions {
            log_to_database: true,
            quote_id: Some(quote_id),
            ..ValidationOptions::default()
        };

        let report = validator.validate_quote(&q, &i, options).await.side_effects.await;
        assert_eq!(report.audit, SideEffectStatus::Completed);
        let records = log.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quote_id, Some(quote_id));
        assert_eq!(records[0].score, 100);
        assert_eq!(records[0].benchmark_version, BENCHMARK_VERSION);
    }
}
