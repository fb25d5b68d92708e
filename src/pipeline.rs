//! The one ordered path from wizard answers to a priced, validated quote:
//! power estimate, cost model, validation, margin, render envelope.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::constants::ConstantsService;
use crate::domain::{FacilityAttributes, PowerCalculationResult};
use crate::margin::{to_margin_render_envelope, MarginPolicy, MarginRenderEnvelope, MarginResult};
use crate::power::calculate_use_case_power;
use crate::quote::{calculate_quote, QuoteInputs, QuoteResult};
use crate::validator::{QuoteValidator, ValidatedQuote, ValidationOptions};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[validate(length(min = 1, max = 64))]
    pub slug: String,
    #[serde(default)]
    pub facility: FacilityAttributes,
    /// Defaults to the estimated facility peak.
    #[serde(rename = "storageSizeMW", default)]
    #[validate(range(min = 0.0, max = 1000.0))]
    pub storage_size_mw: Option<f64>,
    /// Defaults to the facility type's backup duration.
    #[serde(default)]
    #[validate(range(min = 0.5, max = 24.0))]
    pub duration_hours: Option<f64>,
    #[serde(rename = "solarMW", default)]
    #[validate(range(min = 0.0, max = 1000.0))]
    pub solar_mw: Option<f64>,
    #[serde(default)]
    pub log_to_database: Option<bool>,
}

impl QuoteRequest {
    pub fn new(slug: impl Into<String>, facility: FacilityAttributes) -> Self {
        Self {
            slug: slug.into(),
            facility,
            storage_size_mw: None,
            duration_hours: None,
            solar_mw: None,
            log_to_database: None,
        }
    }
}

#[derive(Debug)]
pub struct BuiltQuote {
    pub quote_id: Uuid,
    pub power: PowerCalculationResult,
    pub inputs: QuoteInputs,
    pub quote: QuoteResult,
    pub margin: MarginResult,
    pub envelope: MarginRenderEnvelope,
    pub validation: ValidatedQuote,
}

pub struct QuoteBuilder {
    constants: Arc<ConstantsService>,
    validator: QuoteValidator,
    margin: MarginPolicy,
    audit_by_default: bool,
    alert_threshold: u8,
}

impl QuoteBuilder {
    pub fn new(constants: Arc<ConstantsService>, validator: QuoteValidator, margin: MarginPolicy) -> Self {
        Self {
            constants,
            validator,
            margin,
            audit_by_default: false,
            alert_threshold: crate::validator::DEFAULT_ALERT_THRESHOLD,
        }
    }

    pub fn from_config(constants: Arc<ConstantsService>, validator: QuoteValidator, cfg: &Config) -> Self {
        let margin = MarginPolicy::new(cfg.margin.policy_version.clone(), cfg.margin.min_margin_percent);
        Self {
            audit_by_default: cfg.validator.audit_enabled,
            alert_threshold: cfg.validator.alert_threshold,
            ..Self::new(constants, validator, margin)
        }
    }

    pub fn constants(&self) -> &ConstantsService {
        &self.constants
    }

    fn quote_inputs(request: &QuoteRequest, power: &PowerCalculationResult) -> QuoteInputs {
        let positive = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
        QuoteInputs {
            storage_size_mw: positive(request.storage_size_mw).unwrap_or(power.power_mw),
            duration_hours: positive(request.duration_hours).unwrap_or(power.duration_hrs),
            solar_mw: positive(request.solar_mw).unwrap_or(0.0),
            benchmark_peak_mw: Some(power.power_mw),
            use_case: power.inputs.get("useCase").and_then(|v| v.as_str()).map(str::to_string),
        }
    }

    pub async fn build(&self, request: &QuoteRequest) -> BuiltQuote {
        let quote_id = Uuid::new_v4();
        let power = calculate_use_case_power(&request.slug, &request.facility);
        let inputs = Self::quote_inputs(request, &power);

        let constants = self.constants.get_calculation_constants().await;
        let quote = calculate_quote(&inputs, &constants);

        let options = ValidationOptions {
            log_to_database: request.log_to_database.unwrap_or(self.audit_by_default),
            alert_threshold: self.alert_threshold,
            quote_id: Some(quote_id),
            use_case: inputs.use_case.clone(),
        };
        let validation = self.validator.validate_quote(&quote, &inputs, options).await;

        let margin = self.margin.apply(&quote);
        let envelope = to_margin_render_envelope(&margin);

        info!(
            %quote_id,
            slug = %request.slug,
            power_mw = power.power_mw,
            total_cost = quote.costs.total_project_cost,
            score = validation.result.score,
            needs_review = margin.needs_review,
            "quote built"
        );

        BuiltQuote { quote_id, power, inputs, quote, margin, envelope, validation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MemoryConstantsSource, DEFAULT_CACHE_TTL};
    use crate::validator::{MemoryAuditLog, SideEffectStatus};

    fn builder() -> (QuoteBuilder, Arc<MemoryAuditLog>) {
        let constants = Arc::new(ConstantsService::new(Arc::new(MemoryConstantsSource::seeded()), DEFAULT_CACHE_TTL));
        let audit = Arc::new(MemoryAuditLog::new());
        let validator = QuoteValidator::new().with_audit_log(audit.clone());
        (QuoteBuilder::new(constants, validator, MarginPolicy::default()), audit)
    }

    #[tokio::test]
    async fn test_storage_defaults_to_estimated_peak() {
        let (builder, _) = builder();
        let request = QuoteRequest::new("office", FacilityAttributes::new().with("squareFeet", 50_000));
        let built = builder.build(&request).await;

        assert_eq!(built.power.power_mw, 0.3);
        assert_eq!(built.inputs.storage_size_mw, 0.3);
        assert_eq!(built.inputs.duration_hours, 4.0);
        assert_eq!(built.inputs.use_case.as_deref(), Some("office"));
        assert!((built.quote.energy_kwh - 1_200.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_explicit_sizing_wins() {
        let (builder, _) = builder();
        let mut request = QuoteRequest::new("hotel", FacilityAttributes::new());
        request.storage_size_mw = Some(1.0);
        request.duration_hours = Some(2.0);
        request.solar_mw = Some(0.5);
        let built = builder.build(&request).await;

        assert_eq!(built.inputs.storage_size_mw, 1.0);
        assert_eq!(built.inputs.duration_hours, 2.0);
        assert!(built.quote.equipment.solar > 0.0);
    }

    #[tokio::test]
    async fn test_audit_requested_per_quote() {
        let (builder, audit) = builder();
        let mut request = QuoteRequest::new("warehouse", FacilityAttributes::new());
        request.log_to_database = Some(true);
        let built = builder.build(&request).await;

        let report = built.validation.side_effects.await;
        assert_eq!(report.audit, SideEffectStatus::Completed);
        let records = audit.records().await;
        assert_eq!(records[0].quote_id, Some(built.quote_id));
        assert_eq!(records[0].use_case.as_deref(), Some("warehouse"));
    }

    #[test]
    fn test_request_validation() {
        let mut request = QuoteRequest::new("", FacilityAttributes::new());
        assert!(request.validate().is_err());
        request.slug = "office".into();
        request.duration_hours = Some(48.0);
        assert!(request.validate().is_err());
        request.duration_hours = Some(4.0);
        assert!(request.validate().is_ok());
    }
}
