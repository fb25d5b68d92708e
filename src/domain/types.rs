use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Loose facility attributes (wire format from the wizard)
// ============================================================================

/// A single answer collected by the wizard.
///
/// The UI sends numbers, strings and booleans interchangeably (a room count may
/// arrive as `133` or `"133"`), so parsing is lenient and never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Interpret the value as a finite number.
    ///
    /// Text is trimmed, thousands separators are removed and a trailing unit
    /// suffix (`"50,000 sq ft"`, `"2.5MW"`) is ignored.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => parse_leading_number(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then_some(s)
            }
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Number(n) if n.is_finite() => Some(*n != 0.0),
            FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Some(true),
                "false" | "no" | "n" | "0" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Flag(b) => serde_json::Value::Bool(*b),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Flag(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// Leading number of a free-text answer: `"$1,200"`, `"50,000 sq ft"`,
/// `"2.5MW"`, `"1e6"`. Trailing units are ignored.
fn parse_leading_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    let (sign, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let rest = rest.trim_start_matches(|c: char| matches!(c, '$' | '€' | '£')).trim_start();

    let bytes = rest.as_bytes();
    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit() || **b == b'.').count();
    // An exponent only counts when digits follow it, so "3em" still reads as 3.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits = bytes[exp..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            end = exp + digits;
        }
    }

    let value: f64 = format!("{sign}{}", &rest[..end]).parse().ok()?;
    value.is_finite().then_some(value)
}

/// Everything the wizard knows about one facility, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityAttributes(BTreeMap<String, FieldValue>);

impl FacilityAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy in tests and fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FacilityAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// Estimation output
// ============================================================================

/// Echoed inputs attached to every estimate, ordered for deterministic output.
pub type EchoedInputs = BTreeMap<String, serde_json::Value>;

/// Peak-demand estimate for one facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerCalculationResult {
    #[serde(rename = "powerMW")]
    pub power_mw: f64,
    pub duration_hrs: f64,
    pub description: String,
    pub calculation_method: String,
    pub inputs: EchoedInputs,
}

impl PowerCalculationResult {
    pub fn power_kw(&self) -> f64 {
        self.power_mw * 1000.0
    }

    pub fn energy_mwh(&self) -> f64 {
        self.power_mw * self.duration_hrs
    }

    pub(crate) fn echo(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.inputs.insert(key.to_string(), value.into());
        self
    }
}

impl fmt::Display for PowerCalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} MW / {}h ({})", self.power_mw, self.duration_hrs, self.calculation_method)
    }
}

// ============================================================================
// Numeric helpers
// ============================================================================

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a quantity with `,` thousands separators (`50000.0` -> `"50,000"`).
///
/// Fractional parts are rounded away; the descriptions only ever embed whole
/// counts and areas.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

/// Format a dollar amount for display (`1234567.8` -> `"$1,234,568"`).
pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_thousands(value.abs()))
    } else {
        format!("${}", format_thousands(value))
    }
}
