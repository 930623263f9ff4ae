use crate::{
    error::AppResult,
    models::{Forecast, Location},
};

/// External collaborators
///
/// The weather provider and the text generator are the only suspension points
/// of a pipeline run. Both sit behind traits so the orchestrator and the
/// composer strategies can be exercised with mocks.
pub mod gemini;
pub mod open_meteo;

pub use gemini::GeminiGenerator;
pub use open_meteo::OpenMeteoProvider;

/// Source of current and next-day temperatures
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the current temperature and tomorrow's max/min for `location`
    ///
    /// Missing or malformed fields are reported as `AppError::Fetch`, never
    /// defaulted.
    async fn fetch_forecast(&self, location: Location) -> AppResult<Forecast>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Text-generation collaborator
///
/// Takes a fully rendered prompt and returns the raw JSON text produced by the
/// model. Callers validate that text against the schema they asked for.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_json(&self, prompt: &str) -> AppResult<String>;

    /// Generator name for logging and debugging
    fn name(&self) -> &'static str;
}
