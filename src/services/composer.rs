//! Outfit composition: one item per category
//!
//! Items are grouped by category in the order the categories first appear,
//! then an [`ItemPicker`] chooses one item from each group. The picker is the
//! only source of nondeterminism, so tests pin outcomes by passing
//! [`FirstPicker`] or a seeded [`RandomPicker`].

use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;

use crate::models::{ClothingItem, Outfit};

/// Chooses one item out of a category group
pub trait ItemPicker: Send {
    /// Index into a group of `len` candidates; `len` is never zero
    fn pick(&mut self, len: usize) -> usize;
}

/// Always takes the first item of each group
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPicker;

impl ItemPicker for FirstPicker {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Uniform random choice within each group
#[derive(Debug, Clone)]
pub struct RandomPicker<R = StdRng> {
    rng: R,
}

impl RandomPicker<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> ItemPicker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Item selection policy for the local strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSelection {
    #[default]
    Random,
    First,
}

impl ItemSelection {
    /// Fresh picker for one composition; a seed makes random picks repeatable
    pub fn picker(&self, seed: Option<u64>) -> Box<dyn ItemPicker> {
        match (self, seed) {
            (ItemSelection::First, _) => Box::new(FirstPicker),
            (ItemSelection::Random, Some(seed)) => Box::new(RandomPicker::seeded(seed)),
            (ItemSelection::Random, None) => Box::new(RandomPicker::from_entropy()),
        }
    }
}

/// Groups items by category, preserving first-appearance order
pub fn group_by_category<'a>(items: &[&'a ClothingItem]) -> Vec<Vec<&'a ClothingItem>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&ClothingItem>> = Vec::new();

    for &item in items {
        match index.get(item.category.as_str()) {
            Some(&position) => groups[position].push(item),
            None => {
                index.insert(item.category.as_str(), groups.len());
                groups.push(vec![item]);
            }
        }
    }

    groups
}

/// Composes an outfit with exactly one item per category present in `filtered`
pub fn compose(filtered: &[&ClothingItem], picker: &mut dyn ItemPicker) -> Outfit {
    let items: Vec<ClothingItem> = group_by_category(filtered)
        .into_iter()
        .map(|group| {
            // Clamp so a misbehaving picker cannot index out of bounds
            let position = picker.pick(group.len()).min(group.len() - 1);
            group[position].clone()
        })
        .collect();

    tracing::debug!(
        candidates = filtered.len(),
        categories = items.len(),
        "Outfit composed"
    );

    Outfit::new(items)
}
