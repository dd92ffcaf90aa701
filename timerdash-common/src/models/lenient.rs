//! Forgiving field decoders.
//!
//! The bot service is loose about its payloads: fields go missing, show up as
//! `null`, or switch between integers and floats depending on which code path
//! produced them. Every model field is routed through one of these helpers so
//! that a single odd field never rejects the whole response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` (or a missing field, together with `#[serde(default)]`) becomes `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `12`, `12.0`, `-3`, `null`. Anything non-numeric becomes 0.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_i64_from_value(Option::<Value>::deserialize(deserializer)?).unwrap_or_default())
}

/// Like [`lenient_i64`] but keeps the distinction between "absent" and "zero".
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_i64_from_value(Option::<Value>::deserialize(deserializer)?))
}

/// Unsigned variant used for event times; negatives clamp to 0.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = opt_i64_from_value(Option::<Value>::deserialize(deserializer)?).unwrap_or_default();
    Ok(u64::try_from(v).unwrap_or(0))
}

/// Accepts either a JSON string or a number and keeps it as text (match ids).
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Text field that may arrive as a number (log line numbers). Other shapes become "".
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_number(deserializer)?.unwrap_or_default())
}

fn opt_i64_from_value(value: Option<Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_i64")]
        secs: i64,
        #[serde(default, deserialize_with = "lenient_opt_i64")]
        game_time: Option<i64>,
        #[serde(default, deserialize_with = "lenient_u64")]
        at: u64,
        #[serde(default, deserialize_with = "string_or_number")]
        match_id: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn missing_and_null_fields_default() {
        let p: Probe = serde_json::from_str(r#"{"secs": null, "tags": null}"#).unwrap();
        assert_eq!(p.secs, 0);
        assert_eq!(p.game_time, None);
        assert_eq!(p.at, 0);
        assert_eq!(p.match_id, None);
        assert!(p.tags.is_empty());
    }

    #[test]
    fn floats_and_strings_are_coerced() {
        let p: Probe = serde_json::from_str(
            r#"{"secs": -90.0, "game_time": 754.9, "at": -5, "match_id": 7712345678}"#,
        )
        .unwrap();
        assert_eq!(p.secs, -90);
        assert_eq!(p.game_time, Some(754));
        assert_eq!(p.at, 0);
        assert_eq!(p.match_id.as_deref(), Some("7712345678"));
    }
}
