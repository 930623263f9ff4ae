//! Outfit composer strategies
//!
//! Both strategies classify the temperature and filter the catalog the same
//! way. They differ in who picks the items: [`LocalStrategy`] composes locally
//! with an [`ItemPicker`](crate::services::composer::ItemPicker) and only asks
//! the generator for a justification, while [`DelegatedStrategy`] hands the
//! filtered candidates to the generator and validates the items it chose.

use std::{collections::HashSet, sync::Arc};

use serde::Deserialize;

use crate::{
    catalog::Catalog,
    error::{AppResult, NO_EXPLANATION_MESSAGE, NO_SUGGESTION_MESSAGE},
    models::{ClothingItem, Outfit, SuggestedItem, TemperatureBand},
    services::{
        classifier::classify,
        composer::{compose, ItemSelection},
        explanation::{generate_outfit_with_data, request_explanation},
        providers::TextGenerator,
        selection::{filter_catalog, MatchRule},
    },
};

/// Outcome of one strategy run
///
/// Composition and explanation fail independently: a failed explanation still
/// carries the composed outfit.
#[derive(Debug)]
pub struct Recommendation {
    pub temperature_celsius: f64,
    pub band: TemperatureBand,
    pub outfit: Outfit,
    pub justification: AppResult<String>,
}

impl Recommendation {
    fn no_suggestion(temperature_celsius: f64, band: TemperatureBand) -> Self {
        Self {
            temperature_celsius,
            band,
            outfit: Outfit::empty(),
            justification: Ok(NO_SUGGESTION_MESSAGE.to_string()),
        }
    }
}

/// Produces an outfit and its justification for one temperature and style
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OutfitStrategy: Send + Sync {
    async fn recommend(&self, temperature_celsius: f64, style: &str) -> AppResult<Recommendation>;

    /// Strategy name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Which strategy the application runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposerStrategy {
    #[default]
    Local,
    Delegate,
}

// ============================================================================
// Local strategy
// ============================================================================

pub struct LocalStrategy {
    catalog: Arc<Catalog>,
    generator: Arc<dyn TextGenerator>,
    rule: MatchRule,
    selection: ItemSelection,
    seed: Option<u64>,
    closet_description: Option<String>,
}

impl LocalStrategy {
    pub fn new(
        catalog: Arc<Catalog>,
        generator: Arc<dyn TextGenerator>,
        rule: MatchRule,
        selection: ItemSelection,
    ) -> Self {
        Self {
            catalog,
            generator,
            rule,
            selection,
            seed: None,
            closet_description: None,
        }
    }

    /// Pins random picks to `seed`
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Passes a description of the whole catalog to the explanation prompt
    pub fn with_closet_description(mut self, enabled: bool) -> Self {
        self.closet_description = enabled.then(|| self.catalog.describe());
        self
    }

    /// Classify, filter and compose, without touching the generator
    pub fn compose_outfit(&self, temperature_celsius: f64, style: &str) -> (TemperatureBand, Outfit) {
        let band = classify(temperature_celsius);
        let filtered = filter_catalog(self.catalog.items(), band, style, &self.rule);
        let mut picker = self.selection.picker(self.seed);
        (band, compose(&filtered, picker.as_mut()))
    }
}

#[async_trait::async_trait]
impl OutfitStrategy for LocalStrategy {
    async fn recommend(&self, temperature_celsius: f64, style: &str) -> AppResult<Recommendation> {
        let (band, outfit) = self.compose_outfit(temperature_celsius, style);

        if outfit.is_empty() {
            tracing::info!(band = %band, style = %style, "No catalog item matches");
            return Ok(Recommendation::no_suggestion(temperature_celsius, band));
        }

        let justification = request_explanation(
            self.generator.as_ref(),
            temperature_celsius,
            style,
            &outfit,
            self.closet_description.as_deref(),
        )
        .await;

        Ok(Recommendation {
            temperature_celsius,
            band,
            outfit,
            justification,
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

// ============================================================================
// Delegated strategy
// ============================================================================

pub struct DelegatedStrategy {
    catalog: Arc<Catalog>,
    generator: Arc<dyn TextGenerator>,
    rule: MatchRule,
}

impl DelegatedStrategy {
    pub fn new(catalog: Arc<Catalog>, generator: Arc<dyn TextGenerator>, rule: MatchRule) -> Self {
        Self {
            catalog,
            generator,
            rule,
        }
    }
}

/// Maps the generator's picks back onto the candidates it was offered
///
/// Names outside the candidate set are dropped, and only the first pick of
/// each category is kept, so the result is a valid outfit of catalog items.
pub fn resolve_suggestion(suggestion: &[SuggestedItem], candidates: &[&ClothingItem]) -> Outfit {
    let mut categories = HashSet::new();
    let mut items = Vec::new();

    for suggested in suggestion {
        let wanted = suggested.name.trim();
        let found = candidates
            .iter()
            .find(|c| c.name == wanted)
            .or_else(|| {
                candidates
                    .iter()
                    .find(|c| c.name.to_lowercase() == wanted.to_lowercase())
            });

        match found {
            Some(&item) => {
                if categories.insert(item.category.as_str()) {
                    items.push(item.clone());
                } else {
                    tracing::debug!(name = %item.name, category = %item.category, "Dropping second pick for category");
                }
            }
            None => {
                tracing::warn!(name = %suggested.name, "Generator suggested an item outside the candidates");
            }
        }
    }

    Outfit::new(items)
}

#[async_trait::async_trait]
impl OutfitStrategy for DelegatedStrategy {
    async fn recommend(&self, temperature_celsius: f64, style: &str) -> AppResult<Recommendation> {
        let band = classify(temperature_celsius);
        let filtered = filter_catalog(self.catalog.items(), band, style, &self.rule);

        if filtered.is_empty() {
            tracing::info!(band = %band, style = %style, "No catalog item matches");
            return Ok(Recommendation::no_suggestion(temperature_celsius, band));
        }

        let response = generate_outfit_with_data(
            self.generator.as_ref(),
            temperature_celsius,
            style,
            &filtered,
        )
        .await?;

        let outfit = resolve_suggestion(&response.outfit_suggestion, &filtered);
        if outfit.is_empty() {
            tracing::warn!(
                band = %band,
                style = %style,
                suggested = response.outfit_suggestion.len(),
                "Generator picked no usable item"
            );
            return Ok(Recommendation::no_suggestion(temperature_celsius, band));
        }

        let justification = match response.justification.trim() {
            "" => NO_EXPLANATION_MESSAGE.to_string(),
            text => text.to_string(),
        };

        tracing::info!(
            band = %band,
            style = %style,
            suggested = response.outfit_suggestion.len(),
            accepted = outfit.len(),
            "Delegated outfit resolved"
        );

        Ok(Recommendation {
            temperature_celsius,
            band,
            outfit,
            justification: Ok(justification),
        })
    }

    fn name(&self) -> &'static str {
        "delegate"
    }
}
