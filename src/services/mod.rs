pub mod classifier;
pub mod composer;
pub mod explanation;
pub mod forecast;
pub mod providers;
pub mod selection;
pub mod strategy;

pub use forecast::ForecastService;
pub use strategy::{ComposerStrategy, DelegatedStrategy, LocalStrategy, OutfitStrategy};
