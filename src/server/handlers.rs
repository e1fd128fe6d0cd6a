use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::quality::models::FoodItemRecord;
use crate::quality::scoring::assess_data_quality;
use crate::quality::summary::format_quality_summary;
use crate::server::response::{ApiError, ApiResponse};
use crate::server::AppState;

const DEFAULT_STATISTICS_SAMPLE: usize = 100;
const DEFAULT_LOW_QUALITY_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub food_item_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatisticsParams {
    pub sample_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LowQualityParams {
    pub threshold: Option<f64>,
    pub limit: Option<usize>,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::ok(state.health.snapshot().await)
}

pub async fn food_item_quality(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.service.assess_food_item(&id).await?;
    state.health.record_assessments(1).await;
    Ok(ApiResponse::ok(report))
}

pub async fn batch_quality(
    State(state): State<AppState>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let batch = state.service.assess_multiple(&request.food_item_ids).await?;
    state.health.record_assessments(batch.total_assessed).await;
    Ok(ApiResponse::ok(batch))
}

pub async fn quality_statistics(
    State(state): State<AppState>,
    Query(params): Query<StatisticsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let sample_size = params.sample_size.unwrap_or(DEFAULT_STATISTICS_SAMPLE);
    let stats = state.service.quality_statistics(sample_size).await?;
    state.health.record_assessments(stats.total_assessed).await;
    Ok(ApiResponse::ok(stats))
}

pub async fn low_quality_items(
    State(state): State<AppState>,
    Query(params): Query<LowQualityParams>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LOW_QUALITY_LIMIT);
    let items = state
        .service
        .find_low_quality_items(params.threshold, limit)
        .await?;
    Ok(ApiResponse::ok(items))
}

/// Score a record supplied in the request body without touching the store.
pub async fn assess_record(
    State(state): State<AppState>,
    body: Result<Json<FoodItemRecord>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(record) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let summary = format_quality_summary(&assess_data_quality(&record));
    state.health.record_assessments(1).await;
    Ok(ApiResponse::ok(summary))
}
