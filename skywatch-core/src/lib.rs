//! Core library for the `skywatch` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The search/fetch lifecycle state machine for a single city query
//! - The OpenWeather provider client and shared domain models
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries or
//! services that want the same search semantics.

pub mod config;
pub mod model;
pub mod provider;
pub mod search;

pub use config::Config;
pub use model::WeatherSnapshot;
pub use provider::{ProviderError, WeatherProvider, openweather::OpenWeatherProvider};
pub use search::{Failure, FailureKind, Phase, SearchController, SearchTicket};
