use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    credential::Credential, decode::decode_current, error::FetchError, model::WeatherResult,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherstack.com";

/// Fahrenheit. Not configurable.
const UNITS: &str = "f";

#[derive(Debug, Clone)]
pub struct WeatherStackProvider {
    base_url: String,
    http: Client,
}

impl WeatherStackProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn current_url(&self) -> String {
        format!("{}/current", self.base_url)
    }
}

impl Default for WeatherStackProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for WeatherStackProvider {
    #[instrument(skip(self, credential), fields(base_url = %self.base_url))]
    async fn current(
        &self,
        credential: &Credential,
        location: &str,
    ) -> Result<WeatherResult, FetchError> {
        let request = credential.with_plaintext(|key| {
            self.http
                .get(self.current_url())
                .query(&[("access_key", key), ("query", location), ("units", UNITS)])
        });

        let res = request.send().await.map_err(FetchError::transport)?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "weatherstack returned an error status");
            return Err(FetchError::RemoteFailure { status });
        }

        let body = res.text().await.map_err(FetchError::transport)?;
        debug!(bytes = body.len(), "received weatherstack response");

        decode_current(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = WeatherStackProvider::with_base_url("http://localhost:8080/");
        assert_eq!(provider.base_url(), "http://localhost:8080");
        assert_eq!(provider.current_url(), "http://localhost:8080/current");
    }

    #[test]
    fn default_points_at_weatherstack() {
        let provider = WeatherStackProvider::default();
        assert_eq!(provider.current_url(), "http://api.weatherstack.com/current");
    }
}
