use serde::{Deserialize, Serialize};

use super::{ClothingItem, TemperatureBand};

/// At most one item per category, in category discovery order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Outfit {
    items: Vec<ClothingItem>,
}

impl Outfit {
    pub fn new(items: Vec<ClothingItem>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.category.as_str()).collect()
    }

    /// Item names as sent to the text generator
    pub fn item_names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.clone()).collect()
    }
}

/// Result of one pipeline run (today or tomorrow) with its own error channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayReport {
    /// Temperature the run was classified with; absent when the forecast could not be fetched
    pub temperature_celsius: Option<f64>,
    pub band: Option<TemperatureBand>,
    pub outfit: Outfit,
    pub justification: String,
    /// User-facing message for a failure of this run only
    pub error: Option<String>,
}

impl DayReport {
    /// Report for a run that could not produce anything
    pub fn failed(temperature_celsius: Option<f64>, error: String) -> Self {
        Self {
            temperature_celsius,
            band: None,
            outfit: Outfit::empty(),
            justification: String::new(),
            error: Some(error),
        }
    }
}

/// Outfits for today and tomorrow for one style
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyOutfits {
    pub style: String,
    pub today: DayReport,
    pub tomorrow: DayReport,
}
