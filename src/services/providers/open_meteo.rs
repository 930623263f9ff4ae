//! Open-Meteo forecast provider
//!
//! One request returns everything a daily run needs:
//! GET /v1/forecast?current=temperature_2m&daily=temperature_2m_max,temperature_2m_min&forecast_days=2

use crate::{
    error::{AppError, AppResult},
    models::{Forecast, Location, OpenMeteoResponse},
    services::providers::WeatherProvider,
};
use reqwest::Client as HttpClient;

const FORECAST_DAYS: &str = "2";

#[derive(Clone)]
pub struct OpenMeteoProvider {
    http_client: HttpClient,
    api_url: String,
}

impl OpenMeteoProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch_forecast(&self, location: Location) -> AppResult<Forecast> {
        let response = self
            .http_client
            .get(self.forecast_url())
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", "temperature_2m".to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min".to_string(),
                ),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, provider = "open-meteo", "Forecast request failed");
            return Err(AppError::Fetch(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        let raw: OpenMeteoResponse = response.json().await.map_err(|e| {
            AppError::Fetch(format!("Failed to parse Open-Meteo response: {}", e))
        })?;

        let forecast = Forecast::try_from(raw)?;

        tracing::info!(
            latitude = location.latitude,
            longitude = location.longitude,
            current = forecast.current.temperature_celsius,
            tomorrow_max = forecast.tomorrow_max.temperature_celsius,
            tomorrow_min = forecast.tomorrow_min.temperature_celsius,
            provider = "open-meteo",
            "Forecast fetched"
        );

        Ok(forecast)
    }

    fn name(&self) -> &'static str {
        "open-meteo"
    }
}
