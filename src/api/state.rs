use std::sync::Arc;

use crate::{
    catalog::Catalog,
    config::Config,
    error::AppResult,
    services::{
        providers::{GeminiGenerator, OpenMeteoProvider, TextGenerator, WeatherProvider},
        ComposerStrategy, DelegatedStrategy, ForecastService, LocalStrategy, OutfitStrategy,
    },
};

/// Shared application state
///
/// Everything in here is read-only after start-up; pipeline runs never share
/// mutable data.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub forecast: ForecastService,
    pub default_style: String,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, forecast: ForecastService, default_style: String) -> Self {
        Self {
            catalog,
            forecast,
            default_style,
        }
    }

    /// Wires the catalog, collaborators and the configured strategy
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = Arc::new(Catalog::load(config.catalog_path.as_deref())?);

        let generator: Arc<dyn TextGenerator> = Arc::new(GeminiGenerator::new(
            config.generation_api_key.clone(),
            config.generation_api_url.clone(),
            config.generation_model.clone(),
        ));
        let weather: Arc<dyn WeatherProvider> =
            Arc::new(OpenMeteoProvider::new(config.weather_api_url.clone()));

        let strategy: Arc<dyn OutfitStrategy> = match config.composer_strategy {
            ComposerStrategy::Local => Arc::new(
                LocalStrategy::new(
                    catalog.clone(),
                    generator,
                    config.match_rule(),
                    config.item_selection,
                )
                .with_seed(config.random_seed)
                .with_closet_description(config.closet_description),
            ),
            ComposerStrategy::Delegate => Arc::new(DelegatedStrategy::new(
                catalog.clone(),
                generator,
                config.match_rule(),
            )),
        };

        tracing::info!(
            strategy = strategy.name(),
            weather = weather.name(),
            catalog_items = catalog.len(),
            "Application state initialized"
        );

        let forecast = ForecastService::new(strategy, weather, config.location());

        Ok(Self::new(catalog, forecast, config.default_style.clone()))
    }
}
