use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use uuid::Uuid;
use validator::Validate;

use super::{
    error::ApiError,
    response::{success, ApiResponse},
    AppState,
};
use crate::{
    constants::{CacheStatus, ConstantsError},
    domain::{FacilityAttributes, PowerCalculationResult},
    margin::MarginRenderEnvelope,
    pipeline::QuoteRequest,
    power::{calculate_use_case_power, FacilityType},
    quote::QuoteResult,
    validator::ValidationResult,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/facility-types", get(list_facility_types))
        .route("/power", post(estimate_power))
        .route("/quotes", post(build_quote))
        .route("/constants", get(list_constants))
        .route("/constants/:key", get(get_constant).put(update_constant))
        .route("/constants/cache", get(cache_status))
        .route("/constants/cache/clear", post(clear_cache))
}

/// GET /api/v1/facility-types
pub async fn list_facility_types() -> ApiResponse<Vec<&'static str>> {
    let slugs: Vec<&'static str> = FacilityType::iter().map(FacilityType::slug).collect();
    let count = slugs.len();
    success(slugs).with_count(count)
}

#[derive(Debug, Deserialize, Validate)]
pub struct PowerRequest {
    #[validate(length(min = 1, max = 64))]
    pub slug: String,
    #[serde(default)]
    pub facility: FacilityAttributes,
}

/// POST /api/v1/power
pub async fn estimate_power(
    Json(req): Json<PowerRequest>,
) -> Result<ApiResponse<PowerCalculationResult>, ApiError> {
    req.validate()?;
    Ok(success(calculate_use_case_power(&req.slug, &req.facility)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub power: PowerCalculationResult,
    pub quote: QuoteResult,
    pub envelope: MarginRenderEnvelope,
    pub validation: ValidationResult,
}

/// POST /api/v1/quotes
///
/// Audit and alert side effects keep running after the response is sent.
pub async fn build_quote(
    State(st): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<ApiResponse<QuoteResponse>, ApiError> {
    req.validate()?;
    let start = Instant::now();
    let built = st.builder.build(&req).await;

    let response = QuoteResponse {
        quote_id: built.quote_id,
        power: built.power,
        quote: built.quote,
        envelope: built.envelope,
        validation: built.validation.result,
    };
    Ok(success(response).with_duration(start.elapsed().as_millis() as u64))
}

#[derive(Debug, Deserialize)]
pub struct ConstantsQuery {
    pub category: Option<String>,
}

/// GET /api/v1/constants?category=equipment
///
/// Without a category every known constant is returned.
pub async fn list_constants(
    State(st): State<AppState>,
    Query(q): Query<ConstantsQuery>,
) -> ApiResponse<BTreeMap<String, f64>> {
    let constants = match q.category.as_deref() {
        Some(category) => st.constants.get_constants_by_category(category).await,
        None => st.constants.get_all_constants().await,
    };
    let count = constants.len();
    success(constants).with_count(count)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConstantValue {
    pub key: String,
    pub value: f64,
}

/// Constant keys are lower snake case, at most 64 characters.
fn check_constant_key(key: &str) -> Result<(), ApiError> {
    let well_formed = !key.is_empty()
        && key.len() <= 64
        && key.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if well_formed {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("malformed constant key {key:?}")))
    }
}

/// GET /api/v1/constants/:key
pub async fn get_constant(
    State(st): State<AppState>,
    Path(key): Path<String>,
) -> Result<ApiResponse<ConstantValue>, ApiError> {
    check_constant_key(&key)?;
    let value = st
        .constants
        .get_constant(&key)
        .await
        .ok_or_else(|| ConstantsError::UnknownKey(key.clone()))?;
    Ok(success(ConstantValue { key, value }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateConstantRequest {
    pub value: f64,
}

/// PUT /api/v1/constants/:key
pub async fn update_constant(
    State(st): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<UpdateConstantRequest>,
) -> Result<ApiResponse<ConstantValue>, ApiError> {
    check_constant_key(&key)?;
    st.constants.update_constant(&key, req.value).await?;
    Ok(success(ConstantValue { key, value: req.value }))
}

/// GET /api/v1/constants/cache
pub async fn cache_status(State(st): State<AppState>) -> ApiResponse<CacheStatus> {
    success(st.constants.cache_status().await)
}

/// POST /api/v1/constants/cache/clear
pub async fn clear_cache(State(st): State<AppState>) -> ApiResponse<CacheStatus> {
    st.constants.clear_cache().await;
    success(st.constants.cache_status().await)
}
