//! Clothing catalog
//!
//! Static reference data loaded once at start-up and shared read-only by every
//! pipeline run. Items are validated here so that the rest of the crate can
//! rely on ids, names and categories being present.

use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::{ClothingItem, TemperatureBand},
};

/// Catalog shipped with the binary
pub const DEFAULT_CATALOG: &str = include_str!("../data/prendas.json");

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ClothingItem>,
}

impl Catalog {
    /// Builds a catalog after validating every item
    pub fn new(items: Vec<ClothingItem>) -> AppResult<Self> {
        let mut seen_ids = HashSet::new();

        for item in &items {
            if item.id.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "Item '{}' has an empty id",
                    item.name
                )));
            }
            if item.name.trim().is_empty() {
                return Err(AppError::Catalog(format!("Item {} has an empty name", item.id)));
            }
            if item.category.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "Item {} has an empty category",
                    item.id
                )));
            }
            if !seen_ids.insert(item.id.as_str()) {
                return Err(AppError::Catalog(format!("Duplicate item id {}", item.id)));
            }

            // Never selectable, but not invalid
            if item.applicable_styles.is_empty() || item.applicable_temperature_bands.is_empty() {
                tracing::warn!(
                    item_id = %item.id,
                    name = %item.name,
                    "Catalog item has no styles or temperature bands and will never be selected"
                );
            }

            for label in &item.applicable_temperature_bands {
                if !is_known_band_label(label) {
                    tracing::debug!(
                        item_id = %item.id,
                        label = %label,
                        "Temperature label outside the band vocabulary"
                    );
                }
            }
        }

        Ok(Self { items })
    }

    /// Parses and validates a JSON array of items
    pub fn from_json(json: &str) -> AppResult<Self> {
        let items: Vec<ClothingItem> = serde_json::from_str(json)
            .map_err(|e| AppError::Catalog(format!("Failed to parse catalog: {}", e)))?;

        Self::new(items)
    }

    /// The catalog bundled in `data/prendas.json`
    pub fn embedded() -> AppResult<Self> {
        Self::from_json(DEFAULT_CATALOG)
    }

    /// Loads the catalog from `path`, or the embedded one when no path is given
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let catalog = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Catalog(format!("Failed to read catalog {}: {}", path, e))
                })?;
                Self::from_json(&json)?
            }
            None => Self::embedded()?,
        };

        tracing::info!(
            items = catalog.len(),
            source = path.unwrap_or("embedded"),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Free-text description of the closet for the explanation prompt
    pub fn describe(&self) -> String {
        self.items
            .iter()
            .map(|i| format!("{} ({})", i.name, i.category))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn is_known_band_label(label: &str) -> bool {
    let label = label.to_lowercase();
    TemperatureBand::ALL
        .iter()
        .any(|band| band.labels().contains(&label.as_str()))
}
