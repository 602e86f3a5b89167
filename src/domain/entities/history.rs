use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One exchange as recorded by the chat server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user: String,
    pub assistant: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<NaiveDateTime>,
}

/// Accepts naive ISO-8601 and RFC 3339 timestamps; anything else becomes `None`
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    let Some(serde_json::Value::String(raw)) = raw else {
        return Ok(None);
    };

    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Ok(Some(naive));
    }
    if let Ok(aware) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(aware.naive_local()));
    }
    tracing::debug!("Unreadable history timestamp: {}", raw);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_with(timestamp: serde_json::Value) -> HistoryEntry {
        serde_json::from_value(json!({
            "user": "oi",
            "assistant": "Olá!",
            "timestamp": timestamp
        }))
        .unwrap()
    }

    #[test]
    fn test_naive_timestamp() {
        let entry = entry_with(json!("2024-05-01T10:20:30.123456"));
        let ts = entry.timestamp.unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-01 10:20:30");
    }

    #[test]
    fn test_offset_timestamp_keeps_local_time() {
        let entry = entry_with(json!("2024-05-01T10:20:30-03:00"));
        let ts = entry.timestamp.unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 10:20");

        let utc = entry_with(json!("2024-05-01T10:20:30Z"));
        assert!(utc.timestamp.is_some());
    }

    #[test]
    fn test_unreadable_timestamp_is_dropped() {
        assert_eq!(entry_with(json!("yesterday")).timestamp, None);
        assert_eq!(entry_with(json!(1714558830)).timestamp, None);
        assert_eq!(entry_with(json!(null)).timestamp, None);
    }
}
