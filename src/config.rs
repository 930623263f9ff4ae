use serde::Deserialize;

use crate::{
    models::Location,
    services::{
        composer::ItemSelection,
        selection::{MatchMode, MatchRule},
        ComposerStrategy,
    },
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Forecast location latitude
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Forecast location longitude
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Open-Meteo API base URL
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// Text generation API key
    pub generation_api_key: String,

    /// Text generation API base URL
    #[serde(default = "default_generation_api_url")]
    pub generation_api_url: String,

    /// Text generation model name
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// JSON catalog file; the embedded catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Who picks the outfit items: `local` or `delegate`
    #[serde(default)]
    pub composer_strategy: ComposerStrategy,

    /// How the local strategy picks within a category: `random` or `first`
    #[serde(default)]
    pub item_selection: ItemSelection,

    /// Pins random picks
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Label matching: `exact` or `substring`
    #[serde(default)]
    pub style_match: MatchMode,

    #[serde(default = "default_case_sensitive")]
    pub style_match_case_sensitive: bool,

    /// Style used when a request names none
    #[serde(default = "default_style")]
    pub default_style: String,

    /// Whether the explanation prompt gets a description of the whole closet
    #[serde(default)]
    pub closet_description: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_latitude() -> f64 {
    -34.9033
}

fn default_longitude() -> f64 {
    -56.1882
}

fn default_weather_api_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_generation_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_generation_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_case_sensitive() -> bool {
    true
}

fn default_style() -> String {
    "Trabajo".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn match_rule(&self) -> MatchRule {
        MatchRule::new(self.style_match, self.style_match_case_sensitive)
    }
}
