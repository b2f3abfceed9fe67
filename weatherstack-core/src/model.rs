use std::{collections::HashMap, fmt, time::Duration};

use serde::Serialize;

use crate::credential::Credential;

pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";

/// Default time budget for one fetch, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Arguments supplied by the host for a single fetch.
///
/// Consumed by the fetch, so the credential is dropped (and wiped) as soon as
/// the call returns, whatever the outcome.
#[derive(Debug)]
pub struct WeatherRequest {
    pub credential: Option<Credential>,
    pub location: Option<String>,
    pub timeout: Duration,
}

impl WeatherRequest {
    pub fn new(credential: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            credential: Some(Credential::new(credential)),
            location: Some(location.into()),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Current conditions as a measurement-name → value map.
///
/// Always holds exactly [`TEMPERATURE`] and [`HUMIDITY`]. Values keep the
/// string form the provider reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeatherResult(HashMap<String, String>);

impl WeatherResult {
    pub fn new(temperature: String, humidity: String) -> Self {
        Self(HashMap::from([
            (TEMPERATURE.to_string(), temperature),
            (HUMIDITY.to_string(), humidity),
        ]))
    }

    pub fn get(&self, measurement: &str) -> Option<&str> {
        self.0.get(measurement).map(String::as_str)
    }

    pub fn temperature(&self) -> &str {
        self.get(TEMPERATURE).unwrap_or_default()
    }

    pub fn humidity(&self) -> &str {
        self.get(HUMIDITY).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.0
    }
}

/// Lifecycle of one fetch. Terminal states never move again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Pending,
    InFlight,
    Succeeded,
    Failed,
}

impl FetchState {
    /// Returns the next state if `self -> next` is a legal transition.
    pub fn advance(self, next: FetchState) -> Option<FetchState> {
        use FetchState::*;

        match (self, next) {
            (Pending, InFlight) | (Pending, Failed) => Some(next),
            (InFlight, Succeeded) | (InFlight, Failed) => Some(next),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FetchState::Pending => "pending",
            FetchState::InFlight => "in_flight",
            FetchState::Succeeded => "succeeded",
            FetchState::Failed => "failed",
        }
    }
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
