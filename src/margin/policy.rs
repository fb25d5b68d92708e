use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::domain::round2;
use crate::quote::QuoteResult;

pub const MIN_LINE_MARGIN_PERCENT: f64 = 5.0;
pub const MAX_LINE_MARGIN_PERCENT: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LineCategory {
    Battery,
    Pcs,
    Solar,
    Installation,
}

impl LineCategory {
    pub fn label(self) -> &'static str {
        match self {
            LineCategory::Battery => "Battery storage",
            LineCategory::Pcs => "Power conversion system",
            LineCategory::Solar => "Solar PV",
            LineCategory::Installation => "Installation & commissioning",
        }
    }
}

/// Deal-size band by total project cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum DealBand {
    Small,
    Mid,
    Large,
    Enterprise,
}

impl DealBand {
    pub fn for_cost(total_cost: f64) -> Self {
        match total_cost {
            c if c < 500_000.0 => DealBand::Small,
            c if c < 2_000_000.0 => DealBand::Mid,
            c if c < 10_000_000.0 => DealBand::Large,
            _ => DealBand::Enterprise,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            DealBand::Small => 1.2,
            DealBand::Mid => 1.0,
            DealBand::Large => 0.85,
            DealBand::Enterprise => 0.7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DealBand::Small => "Small (< $500k)",
            DealBand::Mid => "Mid-market ($500k - $2M)",
            DealBand::Large => "Large ($2M - $10M)",
            DealBand::Enterprise => "Enterprise (> $10M)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampEvent {
    pub category: LineCategory,
    pub requested_percent: f64,
    pub applied_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginLine {
    pub category: LineCategory,
    pub cost: f64,
    pub margin_percent: f64,
    pub sell_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginResult {
    pub policy_version: String,
    pub deal_band: DealBand,
    pub lines: Vec<MarginLine>,
    pub total_cost: f64,
    pub total_sell_price: f64,
    pub blended_margin_percent: f64,
    pub clamp_events: Vec<ClampEvent>,
    pub needs_review: bool,
    pub review_reasons: Vec<String>,
}

/// Base gross margins per line, scaled by deal band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginPolicy {
    pub version: String,
    pub min_margin_percent: f64,
    pub battery_percent: f64,
    pub pcs_percent: f64,
    pub solar_percent: f64,
    pub installation_percent: f64,
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self {
            version: "2025.1".to_string(),
            min_margin_percent: 10.0,
            battery_percent: 18.0,
            pcs_percent: 15.0,
            solar_percent: 12.0,
            installation_percent: 10.0,
        }
    }
}

impl MarginPolicy {
    pub fn new(version: impl Into<String>, min_margin_percent: f64) -> Self {
        Self { version: version.into(), min_margin_percent, ..Self::default() }
    }

    fn base_percent(&self, category: LineCategory) -> f64 {
        match category {
            LineCategory::Battery => self.battery_percent,
            LineCategory::Pcs => self.pcs_percent,
            LineCategory::Solar => self.solar_percent,
            LineCategory::Installation => self.installation_percent,
        }
    }

    /// Price every cost line of a quote. Zero-cost lines (no solar) are omitted.
    pub fn apply(&self, quote: &QuoteResult) -> MarginResult {
        let total_cost = quote.costs.total_project_cost;
        let deal_band = DealBand::for_cost(total_cost);
        let costs = [
            (LineCategory::Battery, quote.equipment.battery),
            (LineCategory::Pcs, quote.equipment.pcs),
            (LineCategory::Solar, quote.equipment.solar),
            (LineCategory::Installation, quote.costs.installation_cost),
        ];

        let mut clamp_events = Vec::new();
        let lines: Vec<MarginLine> = costs
            .into_iter()
            .filter(|(_, cost)| *cost > 0.0)
            .map(|(category, cost)| {
                let requested = self.base_percent(category) * deal_band.multiplier();
                let applied = requested.clamp(MIN_LINE_MARGIN_PERCENT, MAX_LINE_MARGIN_PERCENT);
                if (applied - requested).abs() > f64::EPSILON {
                    debug!(%category, requested, applied, "line margin clamped");
                    clamp_events.push(ClampEvent { category, requested_percent: requested, applied_percent: applied });
                }
                MarginLine { category, cost, margin_percent: applied, sell_price: cost / (1.0 - applied / 100.0) }
            })
            .collect();

        let total_sell_price: f64 = lines.iter().map(|l| l.sell_price).sum();
        let blended_margin_percent = if total_sell_price > 0.0 {
            round2((total_sell_price - total_cost) / total_sell_price * 100.0)
        } else {
            0.0
        };

        let mut review_reasons = Vec::new();
        if blended_margin_percent < self.min_margin_percent {
            review_reasons.push(format!(
                "Blended margin {blended_margin_percent}% is below the {}% minimum",
                self.min_margin_percent
            ));
        }

        MarginResult {
            policy_version: self.version.clone(),
            deal_band,
            lines,
            total_cost,
            total_sell_price,
            blended_margin_percent,
            clamp_events,
            needs_review: !review_reasons.is_empty(),
            review_reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CalculationConstants;
    use crate::quote::{calculate_quote, QuoteInputs};
    use rstest::rstest;

    fn quote(mw: f64, hours: f64, solar_mw: f64) -> QuoteResult {
        let inputs = QuoteInputs {
            storage_size_mw: mw,
            duration_hours: hours,
            solar_mw,
            benchmark_peak_mw: None,
            use_case: None,
        };
        calculate_quote(&inputs, &CalculationConstants::default())
    }

    #[rstest]
    #[case(100_000.0, DealBand::Small)]
    #[case(500_000.0, DealBand::Mid)]
    #[case(1_999_999.0, DealBand::Mid)]
    #[case(2_000_000.0, DealBand::Large)]
    #[case(50_000_000.0, DealBand::Enterprise)]
    fn test_deal_bands(#[case] cost: f64, #[case] band: DealBand) {
        assert_eq!(DealBand::for_cost(cost), band);
    }

    #[test]
    fn test_mid_deal_uses_base_margins() {
        // 1 MW / 4 h = $1.86M total
        let m = MarginPolicy::default().apply(&quote(1.0, 4.0, 0.0));
        assert_eq!(m.deal_band, DealBand::Mid);
        assert_eq!(m.lines.len(), 3);
        assert_eq!(m.lines[0].margin_percent, 18.0);
        assert!(m.clamp_events.is_empty());
        assert!(!m.needs_review);
        assert!(m.total_sell_price > m.total_cost);
    }

    #[test]
    fn test_solar_line_only_when_present() {
        let m = MarginPolicy::default().apply(&quote(1.0, 4.0, 0.5));
        assert!(m.lines.iter().any(|l| l.category == LineCategory::Solar));
    }

    #[test]
    fn test_line_margins_clamped_and_recorded() {
        let policy = MarginPolicy { battery_percent: 28.0, installation_percent: 3.0, ..MarginPolicy::default() };
        // 0.1 MW / 2 h is a small deal: ×1.2
        let m = policy.apply(&quote(0.1, 2.0, 0.0));
        assert_eq!(m.deal_band, DealBand::Small);
        let battery = m.lines.iter().find(|l| l.category == LineCategory::Battery).unwrap();
        assert_eq!(battery.margin_percent, MAX_LINE_MARGIN_PERCENT);
        let install = m.lines.iter().find(|l| l.category == LineCategory::Installation).unwrap();
        assert_eq!(install.margin_percent, MIN_LINE_MARGIN_PERCENT);
        assert_eq!(m.clamp_events.len(), 2);
    }

    #[test]
    fn test_low_blended_margin_needs_review() {
        let policy = MarginPolicy::new("test", 20.0);
        let m = policy.apply(&quote(1.0, 4.0, 0.0));
        assert!(m.needs_review);
        assert_eq!(m.review_reasons.len(), 1);
    }
}
