//! Weather document parsing.
//!
//! The endpoint returns a small JSON envelope:
//!
//! ```json
//! { "data": { "temp": 21.5, "weather": "Cloudy", "timestamp": 1700000000 } }
//! ```
//!
//! Parsing walks the document field by field so every failure names the field
//! that broke, and every check is a type check, not just a presence check.
//! A reading is all-or-nothing: if any of the three mandatory fields is
//! missing or ill-typed the whole reading is discarded.

mod session;

pub use session::{
    DEFAULT_WEATHER_URL, FetchState, FetchTransport, TransportError, WeatherError, WeatherSession,
};

use heapless::String;
use serde_json::Value;
use thiserror_no_std::Error;

/// Longest condition text kept, in bytes.
pub const CONDITION_MAX_LEN: usize = 63;

/// Bounded condition text. Oversized input is truncated on a character
/// boundary rather than copied unchecked.
pub type ConditionText = String<CONDITION_MAX_LEN>;

/// One successfully parsed weather observation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// Temperature in degrees Celsius.
    pub temp_c: f64,
    /// Human-readable condition, e.g. "Partly Cloudy".
    pub condition: ConditionText,
    /// Observation time, Unix epoch seconds.
    pub timestamp: i64,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("response is not valid JSON")]
    MalformedJson,
    #[error("no `data` object in response")]
    MissingDataNode,
    #[error("`data.temp` missing or not a number")]
    MissingTemp,
    #[error("`data.weather` missing or not a string")]
    MissingCondition,
    #[error("`data.timestamp` missing or not a number")]
    MissingTimestamp,
}

/// Parses one weather document.
///
/// Extraction is strictly sequential with early exit on the first failure.
pub fn parse(json_text: &str) -> Result<WeatherReading, ParseError> {
    let root: Value = serde_json::from_str(json_text).map_err(|_| ParseError::MalformedJson)?;

    let data = match root.get("data") {
        Some(node) if node.is_object() => node,
        _ => return Err(ParseError::MissingDataNode),
    };

    let temp_c = data
        .get("temp")
        .and_then(Value::as_f64)
        .ok_or(ParseError::MissingTemp)?;

    let condition_src = data
        .get("weather")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingCondition)?;
    let condition = bounded_copy(condition_src);

    // Accepts any JSON number and truncates to whole seconds.
    let timestamp = data
        .get("timestamp")
        .and_then(Value::as_f64)
        .ok_or(ParseError::MissingTimestamp)? as i64;

    Ok(WeatherReading {
        temp_c,
        condition,
        timestamp,
    })
}

/// Copies `src` into a bounded string, truncating at the last character that
/// still fits.
fn bounded_copy(src: &str) -> ConditionText {
    let mut out = ConditionText::new();
    for ch in src.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"{"data":{"temp":21.5,"weather":"Cloudy","timestamp":1700000000}}"#;

    #[test]
    fn test_round_trip() {
        let reading = parse(GOOD).unwrap();
        assert_eq!(reading.temp_c, 21.5);
        assert_eq!(reading.condition.as_str(), "Cloudy");
        assert_eq!(reading.timestamp, 1700000000);
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(GOOD), parse(GOOD));
        assert_eq!(parse("{"), parse("{"));
    }

    #[test]
    fn test_malformed_json() {
        assert_eq!(parse("not json at all"), Err(ParseError::MalformedJson));
        assert_eq!(parse(""), Err(ParseError::MalformedJson));
    }

    #[test]
    fn test_missing_data_node() {
        assert_eq!(parse(r#"{"foo":1}"#), Err(ParseError::MissingDataNode));
        // Present but not an object is just as bad.
        assert_eq!(parse(r#"{"data":5}"#), Err(ParseError::MissingDataNode));
    }

    #[test]
    fn test_temp_must_be_numeric() {
        let json = r#"{"data":{"temp":"21.5","weather":"Cloudy","timestamp":1700000000}}"#;
        assert_eq!(parse(json), Err(ParseError::MissingTemp));
    }

    #[test]
    fn test_integer_temp_is_accepted() {
        let json = r#"{"data":{"temp":21,"weather":"Clear","timestamp":1700000000}}"#;
        assert_eq!(parse(json).unwrap().temp_c, 21.0);
    }

    #[test]
    fn test_condition_must_be_string() {
        let json = r#"{"data":{"temp":21.5,"weather":7,"timestamp":1700000000}}"#;
        assert_eq!(parse(json), Err(ParseError::MissingCondition));

        let json = r#"{"data":{"temp":21.5,"weather":null,"timestamp":1700000000}}"#;
        assert_eq!(parse(json), Err(ParseError::MissingCondition));
    }

    #[test]
    fn test_timestamp_must_be_numeric() {
        let json = r#"{"data":{"temp":21.5,"weather":"Cloudy"}}"#;
        assert_eq!(parse(json), Err(ParseError::MissingTimestamp));

        let json = r#"{"data":{"temp":21.5,"weather":"Cloudy","timestamp":"soon"}}"#;
        assert_eq!(parse(json), Err(ParseError::MissingTimestamp));
    }

    #[test]
    fn test_fractional_timestamp_truncates_to_seconds() {
        let json = r#"{"data":{"temp":21.5,"weather":"Cloudy","timestamp":1700000000.9}}"#;
        assert_eq!(parse(json).unwrap().timestamp, 1700000000);
    }

    #[test]
    fn test_oversized_condition_is_truncated_within_bounds() {
        let long = "x".repeat(200);
        let json = alloc::format!(
            r#"{{"data":{{"temp":1.0,"weather":"{}","timestamp":0}}}}"#,
            long
        );
        let reading = parse(&json).unwrap();
        assert_eq!(reading.condition.len(), CONDITION_MAX_LEN);
        assert!(reading.condition.chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 62 ASCII bytes followed by a 2-byte character: the multi-byte
        // character does not fit and must be dropped whole.
        let mut cond = "y".repeat(62);
        cond.push('°');
        let json = alloc::format!(
            r#"{{"data":{{"temp":1.0,"weather":"{}","timestamp":0}}}}"#,
            cond
        );
        let reading = parse(&json).unwrap();
        assert_eq!(reading.condition.len(), 62);
        assert!(reading.condition.is_char_boundary(reading.condition.len()));
    }
}
