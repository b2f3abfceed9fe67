//! Decoding of the weatherstack `/current` response body.
//!
//! Fields are looked up explicitly on a [`serde_json::Value`] so that every
//! missing or malformed field becomes a [`FetchError::DecodeFailure`] naming
//! the field, instead of a generic deserialization error.

use serde_json::{Map, Number, Value};

use crate::{
    error::FetchError,
    model::{HUMIDITY, TEMPERATURE, WeatherResult},
};

/// Decode a response body into a [`WeatherResult`].
pub fn decode_current(body: &str) -> Result<WeatherResult, FetchError> {
    let doc: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::decode(format!("response is not valid JSON: {e}")))?;

    let root = doc
        .as_object()
        .ok_or_else(|| FetchError::decode("response is not a JSON object"))?;

    let current = match root.get("current") {
        Some(Value::Object(current)) => current,
        Some(_) => return Err(FetchError::decode("`current` is not an object")),
        None => return Err(FetchError::decode(missing_current(root))),
    };

    let temperature = measurement(current, TEMPERATURE)?;
    let humidity = measurement(current, HUMIDITY)?;

    Ok(WeatherResult::new(temperature, humidity))
}

/// weatherstack answers bad keys, unknown locations and quota exhaustion with
/// `{"success": false, "error": {...}}` and a success status; surface its
/// details in the decode message.
fn missing_current(root: &Map<String, Value>) -> String {
    if root.get("success").and_then(Value::as_bool) != Some(false) {
        return "missing `current` object".to_string();
    }

    let error = root.get("error").and_then(Value::as_object);
    let code = error.and_then(|e| e.get("code")).and_then(Value::as_i64).unwrap_or_default();
    let kind = error
        .and_then(|e| e.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("unknown_error");
    let info = error
        .and_then(|e| e.get("info"))
        .and_then(Value::as_str)
        .unwrap_or("no details provided");

    format!("missing `current` object; weatherstack error {code} ({kind}): {info}")
}

/// Numbers are rendered without a trailing `.0` (`72.0` → `"72"`, `1e2` → `"100"`);
/// numeric strings are kept as given.
fn measurement(current: &Map<String, Value>, field: &str) -> Result<String, FetchError> {
    match current.get(field) {
        Some(Value::Number(n)) => Ok(render_number(n)),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.parse::<f64>().is_ok_and(f64::is_finite) {
                Ok(s.to_string())
            } else {
                Err(FetchError::decode(format!("`current.{field}` is not numeric: {s:?}")))
            }
        }
        Some(Value::Null) | None => {
            Err(FetchError::decode(format!("missing `current.{field}`")))
        }
        Some(other) => Err(FetchError::decode(format!(
            "`current.{field}` has unexpected type: {other}"
        ))),
    }
}

fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}
