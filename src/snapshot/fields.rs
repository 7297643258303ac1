//! Typed field extraction with documented defaults.
//!
//! Producers omit properties freely, and sometimes encode numbers as strings.
//! Every field the routing core consumes goes through one of these helpers so
//! that the default for a missing or invalid value is stated in one place.

use super::types::Properties;
use serde_json::Value;

/// Link property written by the latency predictor.
pub const PREDICTED_LATENCY_KEY: &str = "predicted_latency_ms";

/// Link property written by the telemetry generator.
pub const MEASURED_LATENCY_KEY: &str = "latency_ms";

/// Node property written by the health predictor.
pub const PREDICTED_STATUS_KEY: &str = "predicted_alarm_status";

/// Node property written by the telemetry generator.
pub const MEASURED_STATUS_KEY: &str = "alarm_status";

/// Latency assumed for a link whose prediction is missing or unusable.
///
/// Large enough that weighted searches avoid the link, but the link stays
/// traversable.
pub const MISSING_LATENCY_MS: f64 = 9999.0;

/// Read a numeric property, accepting numbers and numeric strings.
///
/// Returns `None` when the property is absent, null, non-numeric or not finite.
pub fn number(properties: &Properties, key: &str) -> Option<f64> {
    let value = match properties.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Read a string property.
pub fn text<'a>(properties: &'a Properties, key: &str) -> Option<&'a str> {
    properties.get(key).and_then(Value::as_str)
}

/// Read a link latency in milliseconds.
///
/// Negative, non-finite and missing values all become [`MISSING_LATENCY_MS`],
/// which keeps every weight in the graph non-negative.
pub fn latency_ms(properties: &Properties, key: &str) -> f64 {
    match number(properties, key) {
        Some(ms) if ms >= 0.0 => ms,
        _ => MISSING_LATENCY_MS,
    }
}
