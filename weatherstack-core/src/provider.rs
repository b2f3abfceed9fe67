use crate::{
    Config, WeatherResult, credential::Credential, error::FetchError,
    provider::weatherstack::WeatherStackProvider,
};
use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherstack;

/// Source of current conditions for a location.
///
/// Implementations perform one request per call: no retries, no caching.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(
        &self,
        credential: &Credential,
        location: &str,
    ) -> Result<WeatherResult, FetchError>;
}

/// Construct the weatherstack provider, honouring a `base_url` override from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let base_url = config.base_url();

    reqwest::Url::parse(base_url).with_context(|| {
        format!(
            "Invalid base_url '{base_url}' in config.\n\
             Hint: remove it to use the default weatherstack endpoint."
        )
    })?;

    Ok(Box::new(WeatherStackProvider::with_base_url(base_url)))
}
