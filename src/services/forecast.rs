//! Forecast orchestrator
//!
//! Runs the outfit pipeline for today (current temperature) and tomorrow
//! (mean of tomorrow's max and min) as two independent tokio tasks. Each run
//! reports its own error; neither can abort the other.

use std::sync::Arc;

use crate::{
    error::{AppError, NO_EXPLANATION_MESSAGE, NO_SUGGESTION_TOMORROW_MESSAGE},
    models::{average_temperature, DailyOutfits, DayReport, Location, Weather},
    services::{
        providers::WeatherProvider,
        strategy::{OutfitStrategy, Recommendation},
    },
};

const TODAY: &str = "today";
const TOMORROW: &str = "tomorrow";
const PREVIEW: &str = "preview";

#[derive(Clone)]
pub struct ForecastService {
    strategy: Arc<dyn OutfitStrategy>,
    weather: Arc<dyn WeatherProvider>,
    location: Location,
}

impl ForecastService {
    pub fn new(
        strategy: Arc<dyn OutfitStrategy>,
        weather: Arc<dyn WeatherProvider>,
        location: Location,
    ) -> Self {
        Self {
            strategy,
            weather,
            location,
        }
    }

    /// Fetches the forecast and produces both daily outfits
    ///
    /// A failed fetch is reported on both runs and nothing is composed.
    pub async fn daily_outfits(&self, style: &str) -> DailyOutfits {
        match self.weather.fetch_forecast(self.location).await {
            Ok(forecast) => {
                self.produce_daily_outfits(
                    forecast.current,
                    forecast.tomorrow_max,
                    forecast.tomorrow_min,
                    style,
                )
                .await
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    provider = self.weather.name(),
                    "Forecast fetch failed, skipping both runs"
                );
                let message = e.user_message();
                DailyOutfits {
                    style: style.to_string(),
                    today: DayReport::failed(None, message.clone()),
                    tomorrow: DayReport::failed(None, message),
                }
            }
        }
    }

    /// Produces today's and tomorrow's outfits from already known temperatures
    pub async fn produce_daily_outfits(
        &self,
        current: Weather,
        forecast_max: Weather,
        forecast_min: Weather,
        style: &str,
    ) -> DailyOutfits {
        let tomorrow_temperature = average_temperature(&forecast_max, &forecast_min);

        tracing::info!(
            style = %style,
            today = current.temperature_celsius,
            tomorrow = tomorrow_temperature,
            strategy = self.strategy.name(),
            "Producing daily outfits"
        );

        let (today, tomorrow) = tokio::join!(
            run_pipeline(
                self.strategy.clone(),
                current.temperature_celsius,
                style.to_string(),
                TODAY,
            ),
            run_pipeline(
                self.strategy.clone(),
                tomorrow_temperature,
                style.to_string(),
                TOMORROW,
            )
        );

        DailyOutfits {
            style: style.to_string(),
            today,
            tomorrow,
        }
    }

    /// Single run for an explicit temperature
    pub async fn preview(&self, temperature_celsius: f64, style: &str) -> DayReport {
        run_pipeline(
            self.strategy.clone(),
            temperature_celsius,
            style.to_string(),
            PREVIEW,
        )
        .await
    }
}

/// Runs one pipeline in its own task and folds every failure into the report
async fn run_pipeline(
    strategy: Arc<dyn OutfitStrategy>,
    temperature_celsius: f64,
    style: String,
    day: &'static str,
) -> DayReport {
    let task = tokio::spawn(async move { strategy.recommend(temperature_celsius, &style).await });

    match task.await {
        Ok(Ok(recommendation)) => into_report(recommendation, day),
        Ok(Err(e)) => {
            tracing::warn!(
                day = day,
                error = %e,
                generation = e.is_generation(),
                "Outfit pipeline failed"
            );
            DayReport {
                justification: fallback_justification(&e),
                ..DayReport::failed(Some(temperature_celsius), e.user_message())
            }
        }
        Err(e) => {
            tracing::error!(day = day, error = %e, "Outfit pipeline task aborted");
            DayReport::failed(
                Some(temperature_celsius),
                AppError::Internal(e.to_string()).user_message(),
            )
        }
    }
}

fn into_report(recommendation: Recommendation, day: &'static str) -> DayReport {
    let (justification, error) = match recommendation.justification {
        // An empty outfit only ever carries the no-suggestion text
        Ok(_) if recommendation.outfit.is_empty() && day == TOMORROW => {
            (NO_SUGGESTION_TOMORROW_MESSAGE.to_string(), None)
        }
        Ok(text) => (text, None),
        Err(e) => {
            tracing::warn!(
                day = day,
                error = %e,
                generation = e.is_generation(),
                "Outfit explanation failed"
            );
            (fallback_justification(&e), Some(e.user_message()))
        }
    };

    tracing::info!(
        day = day,
        band = %recommendation.band,
        items = recommendation.outfit.len(),
        failed = error.is_some(),
        "Outfit pipeline completed"
    );

    DayReport {
        temperature_celsius: Some(recommendation.temperature_celsius),
        band: Some(recommendation.band),
        outfit: recommendation.outfit,
        justification,
        error,
    }
}

/// Justification shown in place of a failed explanation
fn fallback_justification(error: &AppError) -> String {
    match error {
        AppError::MalformedResponse(_) => NO_EXPLANATION_MESSAGE.to_string(),
        _ => error.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{AppResult, NO_SUGGESTION_MESSAGE, SERVICE_BUSY_MESSAGE},
        models::{ClothingItem, Forecast, Outfit, TemperatureBand},
        services::{
            classifier::classify, providers::MockWeatherProvider, strategy::MockOutfitStrategy,
        },
    };
    use chrono::Utc;

    const LOCATION: Location = Location {
        latitude: -34.9,
        longitude: -56.2,
    };

    fn item(id: &str, category: &str) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            name: format!("item-{}", id),
            category: category.to_string(),
            material: String::new(),
            color: String::new(),
            size: String::new(),
            applicable_styles: vec!["casual".to_string()],
            applicable_temperature_bands: vec!["mild".to_string()],
            image_url: String::new(),
            additional_description: String::new(),
        }
    }

    fn recommendation(t: f64, justification: AppResult<String>) -> Recommendation {
        Recommendation {
            temperature_celsius: t,
            band: classify(t),
            outfit: Outfit::new(vec![item("1", "top")]),
            justification,
        }
    }

    fn unused_weather() -> Arc<dyn WeatherProvider> {
        let mut weather = MockWeatherProvider::new();
        weather.expect_fetch_forecast().never();
        weather.expect_name().return_const("mock");
        Arc::new(weather)
    }

    /// Strategy that panics for hot days and succeeds otherwise
    struct PanickyStrategy;

    #[async_trait::async_trait]
    impl OutfitStrategy for PanickyStrategy {
        async fn recommend(&self, t: f64, _style: &str) -> AppResult<Recommendation> {
            if t > 25.0 {
                panic!("boom");
            }
            Ok(recommendation(t, Ok("Bien.".to_string())))
        }

        fn name(&self) -> &'static str {
            "panicky"
        }
    }

    #[tokio::test]
    async fn test_tomorrow_uses_average_temperature() {
        let mut strategy = MockOutfitStrategy::new();
        strategy
            .expect_recommend()
            .returning(|t, _| Ok(recommendation(t, Ok(format!("t={}", t)))));
        strategy.expect_name().return_const("mock");

        let service = ForecastService::new(Arc::new(strategy), unused_weather(), LOCATION);
        let outfits = service
            .produce_daily_outfits(Weather::new(9.0), Weather::new(30.0), Weather::new(20.0), "casual")
            .await;

        assert_eq!(outfits.style, "casual");
        assert_eq!(outfits.today.temperature_celsius, Some(9.0));
        assert_eq!(outfits.today.band, Some(TemperatureBand::Cold));
        assert_eq!(outfits.tomorrow.temperature_celsius, Some(25.0));
        assert_eq!(outfits.tomorrow.band, Some(TemperatureBand::Mild));
        assert_eq!(outfits.tomorrow.justification, "t=25");
        assert!(outfits.today.error.is_none());
    }

    #[tokio::test]
    async fn test_no_suggestion_wording_per_day() {
        let mut strategy = MockOutfitStrategy::new();
        strategy.expect_recommend().returning(|t, _| {
            Ok(Recommendation {
                outfit: Outfit::empty(),
                ..recommendation(t, Ok(NO_SUGGESTION_MESSAGE.to_string()))
            })
        });
        strategy.expect_name().return_const("mock");

        let service = ForecastService::new(Arc::new(strategy), unused_weather(), LOCATION);
        let outfits = service
            .produce_daily_outfits(Weather::new(18.0), Weather::new(20.0), Weather::new(16.0), "casual")
            .await;
        let preview = service.preview(18.0, "casual").await;

        assert_eq!(outfits.today.justification, NO_SUGGESTION_MESSAGE);
        assert_eq!(outfits.tomorrow.justification, NO_SUGGESTION_TOMORROW_MESSAGE);
        assert!(outfits.tomorrow.error.is_none());
        assert_eq!(preview.justification, NO_SUGGESTION_MESSAGE);
    }

    #[tokio::test]
    async fn test_runs_fail_independently() {
        let mut strategy = MockOutfitStrategy::new();
        strategy.expect_recommend().returning(|t, _| {
            if t > 25.0 {
                Err(AppError::Generation("connection reset".to_string()))
            } else {
                Ok(recommendation(t, Ok("Bien.".to_string())))
            }
        });
        strategy.expect_name().return_const("mock");

        let service = ForecastService::new(Arc::new(strategy), unused_weather(), LOCATION);
        let outfits = service
            .produce_daily_outfits(Weather::new(18.0), Weather::new(32.0), Weather::new(28.0), "casual")
            .await;

        assert_eq!(outfits.today.outfit.len(), 1);
        assert_eq!(outfits.today.justification, "Bien.");
        assert!(outfits.today.error.is_none());

        assert!(outfits.tomorrow.outfit.is_empty());
        let error = outfits.tomorrow.error.unwrap();
        assert!(error.contains("connection reset"));
        assert_eq!(outfits.tomorrow.temperature_celsius, Some(30.0));
    }

    #[tokio::test]
    async fn test_panicking_run_is_isolated() {
        let service = ForecastService::new(Arc::new(PanickyStrategy), unused_weather(), LOCATION);
        let outfits = service
            .produce_daily_outfits(Weather::new(18.0), Weather::new(35.0), Weather::new(31.0), "casual")
            .await;

        assert_eq!(outfits.today.justification, "Bien.");
        assert!(outfits.tomorrow.error.is_some());
        assert!(outfits.tomorrow.outfit.is_empty());
    }

    #[tokio::test]
    async fn test_rate_limited_explanation_keeps_outfit() {
        let mut strategy = MockOutfitStrategy::new();
        strategy.expect_recommend().returning(|t, _| {
            Ok(recommendation(
                t,
                Err(AppError::RateLimited("429 Too Many Requests".to_string())),
            ))
        });
        strategy.expect_name().return_const("mock");

        let service = ForecastService::new(Arc::new(strategy), unused_weather(), LOCATION);
        let report = service.preview(18.0, "casual").await;

        assert_eq!(report.outfit.len(), 1);
        assert_eq!(report.justification, SERVICE_BUSY_MESSAGE);
        assert_eq!(report.error.as_deref(), Some(SERVICE_BUSY_MESSAGE));
    }

    #[tokio::test]
    async fn test_malformed_explanation_falls_back() {
        let mut strategy = MockOutfitStrategy::new();
        strategy.expect_recommend().returning(|t, _| {
            Ok(recommendation(
                t,
                Err(AppError::MalformedResponse("not json".to_string())),
            ))
        });
        strategy.expect_name().return_const("mock");

        let service = ForecastService::new(Arc::new(strategy), unused_weather(), LOCATION);
        let report = service.preview(18.0, "casual").await;

        assert_eq!(report.outfit.len(), 1);
        assert_eq!(report.justification, NO_EXPLANATION_MESSAGE);
        assert!(report.error.unwrap().contains("not json"));
    }

    #[tokio::test]
    async fn test_fetch_error_reported_on_both_runs() {
        let mut weather = MockWeatherProvider::new();
        weather
            .expect_fetch_forecast()
            .times(1)
            .returning(|_| Err(AppError::Fetch("connection refused".to_string())));
        weather.expect_name().return_const("mock");

        let mut strategy = MockOutfitStrategy::new();
        strategy.expect_recommend().never();
        strategy.expect_name().return_const("mock");

        let service = ForecastService::new(Arc::new(strategy), Arc::new(weather), LOCATION);
        let outfits = service.daily_outfits("casual").await;

        for report in [&outfits.today, &outfits.tomorrow] {
            assert!(report.outfit.is_empty());
            assert_eq!(report.temperature_celsius, None);
            assert_eq!(
                report.error.as_deref(),
                Some("Error al obtener la temperatura: connection refused")
            );
        }
    }

    #[tokio::test]
    async fn test_daily_outfits_uses_fetched_forecast() {
        let mut weather = MockWeatherProvider::new();
        weather
            .expect_fetch_forecast()
            .withf(|location| *location == LOCATION)
            .returning(|_| {
                Ok(Forecast {
                    current: Weather::new(5.0),
                    tomorrow_max: Weather::new(14.0),
                    tomorrow_min: Weather::new(8.0),
                    fetched_at: Utc::now(),
                })
            });
        weather.expect_name().return_const("mock");

        let mut strategy = MockOutfitStrategy::new();
        strategy
            .expect_recommend()
            .times(2)
            .returning(|t, _| Ok(recommendation(t, Ok("ok".to_string()))));
        strategy.expect_name().return_const("mock");

        let service = ForecastService::new(Arc::new(strategy), Arc::new(weather), LOCATION);
        let outfits = service.daily_outfits("casual").await;

        assert_eq!(outfits.today.temperature_celsius, Some(5.0));
        assert_eq!(outfits.tomorrow.temperature_celsius, Some(11.0));
    }

    #[test]
    fn test_fallback_justification() {
        assert_eq!(
            fallback_justification(&AppError::RateLimited(String::new())),
            SERVICE_BUSY_MESSAGE
        );
        assert_eq!(
            fallback_justification(&AppError::MalformedResponse(String::new())),
            NO_EXPLANATION_MESSAGE
        );
        let generic = fallback_justification(&AppError::Generation("timeout".to_string()));
        assert!(generic.starts_with("Error: ") && generic.contains("timeout"));
    }
}
