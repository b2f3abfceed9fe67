//! Core library for the `weatherstack` CLI.
//!
//! This crate defines:
//! - The fetch-weather operation: one timeout-bounded, cancellable request
//!   to the weatherstack `/current` endpoint
//! - A typed error taxonomy for every way that request can fail
//! - Credential handling that never prints the API key
//! - Configuration persisted as TOML
//!
//! It is used by `weatherstack-cli`, but any host that can supply a
//! [`tokio_util::sync::CancellationToken`] can drive it.

pub mod config;
pub mod credential;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod model;
pub mod provider;

pub use config::Config;
pub use credential::Credential;
pub use error::FetchError;
pub use fetch::fetch_weather;
pub use model::{FetchState, WeatherRequest, WeatherResult};
pub use provider::{WeatherProvider, provider_from_config, weatherstack::WeatherStackProvider};
