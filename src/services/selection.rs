//! Catalog filtering by temperature band and style
//!
//! Both predicates go through a single [`MatchRule`] so that style names and
//! band labels are compared the same way.

use serde::Deserialize;

use crate::models::{ClothingItem, TemperatureBand};

/// How a requested label is compared against an item's labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Labels must be equal
    #[default]
    Exact,
    /// The item label must contain the requested label
    Substring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRule {
    pub mode: MatchMode,
    pub case_sensitive: bool,
}

impl Default for MatchRule {
    fn default() -> Self {
        Self::exact()
    }
}

impl MatchRule {
    /// Exact, case-sensitive set membership
    pub fn exact() -> Self {
        Self {
            mode: MatchMode::Exact,
            case_sensitive: true,
        }
    }

    pub fn new(mode: MatchMode, case_sensitive: bool) -> Self {
        Self {
            mode,
            case_sensitive,
        }
    }

    /// Compares one item label against one requested label
    pub fn matches(&self, item_label: &str, wanted: &str) -> bool {
        if self.case_sensitive {
            compare(self.mode, item_label, wanted)
        } else {
            compare(self.mode, &item_label.to_lowercase(), &wanted.to_lowercase())
        }
    }

    pub fn matches_style(&self, item: &ClothingItem, style: &str) -> bool {
        item.applicable_styles
            .iter()
            .any(|label| self.matches(label, style))
    }

    pub fn matches_band(&self, item: &ClothingItem, band: TemperatureBand) -> bool {
        item.applicable_temperature_bands.iter().any(|label| {
            band.labels()
                .iter()
                .any(|band_label| self.matches(label, band_label))
        })
    }
}

fn compare(mode: MatchMode, item_label: &str, wanted: &str) -> bool {
    match mode {
        MatchMode::Exact => item_label == wanted,
        MatchMode::Substring => item_label.contains(wanted),
    }
}

/// Keeps the items valid for both `band` and `style`, in catalog order
///
/// An empty result is a valid outcome, not an error.
pub fn filter_catalog<'a>(
    catalog: &'a [ClothingItem],
    band: TemperatureBand,
    style: &str,
    rule: &MatchRule,
) -> Vec<&'a ClothingItem> {
    let filtered: Vec<&ClothingItem> = catalog
        .iter()
        .filter(|item| rule.matches_style(item, style) && rule.matches_band(item, band))
        .collect();

    tracing::debug!(
        band = %band,
        style = %style,
        catalog_size = catalog.len(),
        matched = filtered.len(),
        "Catalog filtered"
    );

    filtered
}
