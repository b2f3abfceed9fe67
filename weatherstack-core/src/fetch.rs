//! The fetch-weather operation: validate inputs, then race the provider call
//! against the time budget and the caller's cancellation signal.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::{
    credential::Credential,
    error::FetchError,
    model::{FetchState, WeatherRequest, WeatherResult},
    provider::WeatherProvider,
};

/// Fetch current conditions for `request.location`.
///
/// Returns [`FetchError::MissingInput`] before touching the network when the
/// credential or location is absent or blank, or the timeout is zero.
/// Whichever of completion, timeout or cancellation comes first decides the
/// outcome; the provider future is dropped when it loses, which aborts the
/// in-flight request. Cancellation wins ties.
#[instrument(
    skip_all,
    fields(
        location = request.location.as_deref().unwrap_or_default(),
        timeout_ms = request.timeout.as_millis() as u64,
    )
)]
pub async fn fetch_weather(
    provider: &dyn WeatherProvider,
    request: WeatherRequest,
    cancel: &CancellationToken,
) -> Result<WeatherResult, FetchError> {
    let mut state = Lifecycle::default();

    let outcome = run(provider, request, cancel, &mut state).await;

    match &outcome {
        Ok(result) => {
            state.move_to(FetchState::Succeeded);
            info!(
                temperature = result.temperature(),
                humidity = result.humidity(),
                "fetched current weather"
            );
        }
        Err(err) => {
            state.move_to(FetchState::Failed);
            warn!(error = %err, "weather fetch failed");
        }
    }

    outcome
}

async fn run(
    provider: &dyn WeatherProvider,
    request: WeatherRequest,
    cancel: &CancellationToken,
    state: &mut Lifecycle,
) -> Result<WeatherResult, FetchError> {
    let WeatherRequest { credential, location, timeout } = request;

    let (credential, location) = validate(credential, location, timeout)?;

    if cancel.is_cancelled() {
        return Err(FetchError::Cancelled);
    }

    state.move_to(FetchState::InFlight);

    tokio::select! {
        biased;

        _ = cancel.cancelled() => Err(FetchError::Cancelled),

        res = tokio::time::timeout(timeout, provider.current(&credential, &location)) => {
            res.unwrap_or(Err(FetchError::Timeout(timeout)))
        }
    }
}

fn validate(
    credential: Option<Credential>,
    location: Option<String>,
    timeout: Duration,
) -> Result<(Credential, String), FetchError> {
    let credential = credential
        .filter(|c| !c.is_blank())
        .ok_or_else(|| FetchError::missing("credential"))?;

    let location = location
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| FetchError::missing("location"))?;

    if timeout.is_zero() {
        return Err(FetchError::missing("timeout"));
    }

    Ok((credential, location))
}

#[derive(Debug)]
struct Lifecycle(FetchState);

impl Default for Lifecycle {
    fn default() -> Self {
        Self(FetchState::Pending)
    }
}

impl Lifecycle {
    fn move_to(&mut self, next: FetchState) {
        match self.0.advance(next) {
            Some(state) => {
                debug!(from = %self.0, to = %state, "fetch state changed");
                self.0 = state;
            }
            None => warn!(from = %self.0, to = %next, "ignored invalid fetch state change"),
        }
    }
}
