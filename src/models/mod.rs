use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

mod clothing;
mod outfit;

pub use clothing::{ClothingItem, StyleOption, TemperatureBand, STYLE_OPTIONS};
pub use outfit::{DailyOutfits, DayReport, Outfit};

/// Geographical location the forecast is requested for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single temperature reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temperature_celsius: f64,
}

impl Weather {
    pub fn new(temperature_celsius: f64) -> Self {
        Self {
            temperature_celsius,
        }
    }
}

/// Current temperature plus tomorrow's extremes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub current: Weather,
    pub tomorrow_max: Weather,
    pub tomorrow_min: Weather,
    pub fetched_at: DateTime<Utc>,
}

impl Forecast {
    /// Representative temperature for tomorrow: mean of max and min
    pub fn tomorrow_average(&self) -> f64 {
        average_temperature(&self.tomorrow_max, &self.tomorrow_min)
    }
}

pub fn average_temperature(max: &Weather, min: &Weather) -> f64 {
    (max.temperature_celsius + min.temperature_celsius) / 2.0
}

// ============================================================================
// Open-Meteo API Types
// ============================================================================

/// Raw response from GET /v1/forecast
///
/// Every field is optional so that missing data is reported as a fetch error
/// instead of a deserialization failure with a less useful message.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub current: Option<OpenMeteoCurrent>,
    #[serde(default)]
    pub daily: Option<OpenMeteoDaily>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenMeteoCurrent {
    #[serde(default)]
    pub temperature_2m: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenMeteoDaily {
    #[serde(default)]
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
}

/// Index of tomorrow in the daily arrays (index 0 is today)
const TOMORROW: usize = 1;

fn tomorrow_value(values: &Option<Vec<Option<f64>>>, field: &str) -> Result<f64, AppError> {
    values
        .as_ref()
        .and_then(|v| v.get(TOMORROW).copied().flatten())
        .ok_or_else(|| AppError::Fetch(format!("API response missing daily.{}[1]", field)))
}

impl TryFrom<OpenMeteoResponse> for Forecast {
    type Error = AppError;

    fn try_from(response: OpenMeteoResponse) -> Result<Self, Self::Error> {
        let current = response
            .current
            .and_then(|c| c.temperature_2m)
            .ok_or_else(|| {
                AppError::Fetch("API response missing current.temperature_2m".to_string())
            })?;

        let daily = response
            .daily
            .ok_or_else(|| AppError::Fetch("API response missing daily data".to_string()))?;

        let max = tomorrow_value(&daily.temperature_2m_max, "temperature_2m_max")?;
        let min = tomorrow_value(&daily.temperature_2m_min, "temperature_2m_min")?;

        Ok(Forecast {
            current: Weather::new(current),
            tomorrow_max: Weather::new(max),
            tomorrow_min: Weather::new(min),
            fetched_at: Utc::now(),
        })
    }
}

// ============================================================================
// Text Generation Payloads
// ============================================================================

/// Structured input for an outfit explanation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub temperature_celsius: f64,
    pub style: String,
    pub outfit: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_closet: Option<String>,
}

/// Expected JSON answer for an explanation request
#[derive(Debug, Clone, Deserialize)]
pub struct ExplanationResponse {
    pub explanation: String,
}

/// Structured input when the generator chooses the outfit itself
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitWithDataRequest {
    pub temperature_celsius: f64,
    pub style: String,
    pub clothing_items: Vec<ClothingItem>,
}

/// Expected JSON answer when the generator chooses the outfit itself
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitWithDataResponse {
    pub outfit_suggestion: Vec<SuggestedItem>,
    pub justification: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedItem {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(default, alias = "imagen_url")]
    pub image_url: String,
}

// ============================================================================
// Gemini API Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub response_mime_type: String,
}

/// Response from POST /v1beta/models/{model}:generateContent
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

/// Error envelope returned by the Gemini API on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorBody {
    pub error: GeminiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
