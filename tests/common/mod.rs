#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use outfit_forecast::{
    catalog::Catalog,
    error::AppResult,
    models::ClothingItem,
    services::providers::TextGenerator,
};

type Reply = Box<dyn Fn(&str) -> AppResult<String> + Send + Sync>;

/// Text generator that answers with a canned reply and counts calls
pub struct FakeGenerator {
    reply: Reply,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn new(reply: impl Fn(&str) -> AppResult<String> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn explaining(text: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(format!(r#"{{"explanation": "{}"}}"#, text)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_json(&self, prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(prompt)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn item(id: &str, name: &str, category: &str, styles: &[&str], bands: &[&str]) -> ClothingItem {
    ClothingItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        material: "Algodón".to_string(),
        color: "Azul".to_string(),
        size: "M".to_string(),
        applicable_styles: styles.iter().map(|s| s.to_string()).collect(),
        applicable_temperature_bands: bands.iter().map(|s| s.to_string()).collect(),
        image_url: format!("https://img.local/{}.png", id),
        additional_description: String::new(),
    }
}

pub fn catalog(items: Vec<ClothingItem>) -> Arc<Catalog> {
    Arc::new(Catalog::new(items).expect("valid test catalog"))
}

/// Open-Meteo body with the given current temperature and tomorrow's extremes
pub fn open_meteo_body(current: f64, tomorrow_max: f64, tomorrow_min: f64) -> serde_json::Value {
    serde_json::json!({
        "latitude": -34.9,
        "longitude": -56.2,
        "current": {"time": "2024-07-01T10:00", "temperature_2m": current},
        "daily": {
            "time": ["2024-07-01", "2024-07-02"],
            "temperature_2m_max": [current + 2.0, tomorrow_max],
            "temperature_2m_min": [current - 2.0, tomorrow_min]
        }
    })
}
