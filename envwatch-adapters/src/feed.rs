//! Wire types for a channel feed.
//!
//! A feed read returns channel metadata plus a list of entries. Only the
//! entries are kept. Every entry carries up to eight value fields, sent as
//! strings, numbers or `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use envwatch_types::RawRecord;

/// Response body of a channel feed read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelFeed {
    #[serde(default)]
    pub feeds: Vec<FeedEntry>,
}

impl ChannelFeed {
    /// The most recent entry, or `None` when the channel has no data.
    pub fn latest(mut self) -> Option<FeedEntry> {
        self.feeds.pop()
    }
}

/// One entry of a channel feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedEntry {
    /// Server timestamp of the entry (ISO-8601).
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub entry_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field1: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field2: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field3: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field4: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field5: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field6: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field7: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub field8: Option<String>,
}

impl FeedEntry {
    /// Raw value of an upstream field by name (`"field1"` to `"field8"`).
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "field1" => &self.field1,
            "field2" => &self.field2,
            "field3" => &self.field3,
            "field4" => &self.field4,
            "field5" => &self.field5,
            "field6" => &self.field6,
            "field7" => &self.field7,
            "field8" => &self.field8,
            _ => return None,
        };
        value.as_deref()
    }

    /// Convert to a raw record keyed by upstream field name.
    ///
    /// All eight fields are present as keys; `null` values map to `None`.
    pub fn to_record(&self) -> RawRecord {
        [
            ("field1", &self.field1),
            ("field2", &self.field2),
            ("field3", &self.field3),
            ("field4", &self.field4),
            ("field5", &self.field5),
            ("field6", &self.field6),
            ("field7", &self.field7),
            ("field8", &self.field8),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
    }
}

// Some firmware posts bare numbers instead of strings.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_of_empty_channel() {
        let feed: ChannelFeed =
            serde_json::from_str(r#"{"channel":{"id":3035795,"name":"Station"},"feeds":[]}"#)
                .unwrap();
        assert!(feed.feeds.is_empty());
        assert!(feed.latest().is_none());
    }

    #[test]
    fn test_latest_takes_last_entry() {
        let body = r#"{"feeds":[
            {"created_at":"2025-01-01T00:00:00Z","entry_id":1,"field1":"20.0"},
            {"created_at":"2025-01-01T00:01:00Z","entry_id":2,"field1":"21.5"}
        ]}"#;
        let feed: ChannelFeed = serde_json::from_str(body).unwrap();
        let entry = feed.latest().unwrap();
        assert_eq!(entry.entry_id, Some(2));
        assert_eq!(entry.field("field1"), Some("21.5"));
    }

    #[test]
    fn test_numeric_and_null_fields() {
        let body = r#"{"entry_id":7,"field1":23.5,"field2":null,"field3":"41"}"#;
        let entry: FeedEntry = serde_json::from_str(body).unwrap();

        assert_eq!(entry.field("field1"), Some("23.5"));
        assert_eq!(entry.field("field2"), None);
        assert_eq!(entry.field("field3"), Some("41"));
        assert_eq!(entry.field("field4"), None);
        assert_eq!(entry.field("field9"), None);
    }

    #[test]
    fn test_to_record_has_all_eight_keys() {
        let entry = FeedEntry {
            field6: Some("12.5".to_string()),
            ..Default::default()
        };
        let record = entry.to_record();

        assert_eq!(record.len(), 8);
        assert_eq!(record.get("field6"), Some(&Some("12.5".to_string())));
        assert_eq!(record.get("field1"), Some(&None));
    }
}
