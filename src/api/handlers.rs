use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ClothingItem, DailyOutfits, DayReport, StyleOption, STYLE_OPTIONS},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct OutfitQuery {
    pub style: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub temperature_celsius: f64,
    pub style: Option<String>,
}

/// Falls back to the default style when none is given; a blank style is rejected
fn resolve_style(requested: Option<String>, default_style: &str) -> AppResult<String> {
    match requested {
        None => Ok(default_style.to_string()),
        Some(style) if style.trim().is_empty() => {
            Err(AppError::InvalidInput("Style cannot be empty".to_string()))
        }
        Some(style) => Ok(style),
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Today's and tomorrow's outfits for the configured location
pub async fn get_daily_outfits(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<OutfitQuery>,
) -> AppResult<Json<DailyOutfits>> {
    let style = resolve_style(params.style, &state.default_style)?;

    tracing::info!(
        request_id = %request_id,
        style = %style,
        "Processing daily outfits request"
    );

    let outfits = state.forecast.daily_outfits(&style).await;

    tracing::info!(
        request_id = %request_id,
        today_items = outfits.today.outfit.len(),
        tomorrow_items = outfits.tomorrow.outfit.len(),
        "Daily outfits completed"
    );

    Ok(Json(outfits))
}

/// Single-day outfit for a temperature chosen by the user
pub async fn preview_outfit(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<PreviewRequest>,
) -> AppResult<Json<DayReport>> {
    if !request.temperature_celsius.is_finite() {
        return Err(AppError::InvalidInput(
            "Temperature must be a finite number".to_string(),
        ));
    }
    let style = resolve_style(request.style, &state.default_style)?;

    tracing::info!(
        request_id = %request_id,
        temperature = request.temperature_celsius,
        style = %style,
        "Processing outfit preview"
    );

    let report = state
        .forecast
        .preview(request.temperature_celsius, &style)
        .await;

    Ok(Json(report))
}

pub async fn get_catalog(State(state): State<AppState>) -> Json<Vec<ClothingItem>> {
    Json(state.catalog.items().to_vec())
}

pub async fn get_styles() -> Json<Vec<StyleOption>> {
    Json(STYLE_OPTIONS.to_vec())
}
