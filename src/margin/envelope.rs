use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::policy::MarginResult;
use crate::domain::format_currency;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("margin computation is not available on a render envelope; call the margin policy server-side")]
    ComputationForbidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeLine {
    pub label: String,
    pub cost_display: String,
    pub sell_display: String,
    pub margin_display: String,
}

/// Display-only projection of a priced quote.
///
/// Everything is preformatted. The two computation entry points exist only to
/// fail, so a renderer cannot quietly re-derive prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginRenderEnvelope {
    pub policy_version: String,
    pub deal_band: String,
    pub line_items: Vec<EnvelopeLine>,
    pub total_cost_display: String,
    pub total_sell_display: String,
    pub blended_margin_display: String,
    pub needs_review: bool,
    pub review_reasons: Vec<String>,
    pub clamp_notices: Vec<String>,
}

impl MarginRenderEnvelope {
    pub fn recompute_margin(&self) -> Result<f64, EnvelopeError> {
        Err(EnvelopeError::ComputationForbidden)
    }

    pub fn recalculate_sell_price(&self) -> Result<f64, EnvelopeError> {
        Err(EnvelopeError::ComputationForbidden)
    }
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn to_margin_render_envelope(result: &MarginResult) -> MarginRenderEnvelope {
    MarginRenderEnvelope {
        policy_version: result.policy_version.clone(),
        deal_band: result.deal_band.label().to_string(),
        line_items: result
            .lines
            .iter()
            .map(|line| EnvelopeLine {
                label: line.category.label().to_string(),
                cost_display: format_currency(line.cost),
                sell_display: format_currency(line.sell_price),
                margin_display: percent(line.margin_percent),
            })
            .collect(),
        total_cost_display: format_currency(result.total_cost),
        total_sell_display: format_currency(result.total_sell_price),
        blended_margin_display: percent(result.blended_margin_percent),
        needs_review: result.needs_review,
        review_reasons: result.review_reasons.clone(),
        clamp_notices: result
            .clamp_events
            .iter()
            .map(|e| {
                format!(
                    "{} margin limited to {} (policy asked for {})",
                    e.category.label(),
                    percent(e.applied_percent),
                    percent(e.requested_percent)
                )
            })
            .collect(),
    }
}
