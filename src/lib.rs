//! Outfit recommendations for today and tomorrow
//!
//! Classifies the temperature into a band, filters the clothing catalog by band
//! and style, composes one item per category and asks a text generator to
//! justify the result. [`services::ForecastService`] runs that pipeline for the
//! current temperature and for tomorrow's forecast, each with its own error
//! channel.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
