//! Event listings shown by the popular-events carousel

use crate::types::{DisplayItem, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named category (event format or theme)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Display title
    pub title: String,
}

impl Label {
    /// Create a label with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Summary of an event as returned by the events API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Event id
    pub id: u64,
    /// Event title
    pub title: String,
    /// When the event starts
    #[serde(with = "timestamp")]
    pub started_at: DateTime<Utc>,
    /// When the listing was published
    #[serde(with = "timestamp")]
    pub published_at: DateTime<Utc>,
    /// Venue name or address
    #[serde(default)]
    pub venue: String,
    /// File name of the poster image, if one was uploaded
    #[serde(default)]
    pub poster_name: Option<String>,
    /// Event format (concert, exhibition, ...)
    pub format: Label,
    /// Themes the event is tagged with
    #[serde(default)]
    pub themes: Vec<Label>,
}

impl DisplayItem for EventSummary {
    fn id(&self) -> ItemId {
        ItemId::from(self.id)
    }

    fn published_at(&self) -> Option<DateTime<Utc>> {
        Some(self.published_at)
    }
}

/// Timestamps as sent by the events API
///
/// Accepts RFC 3339 (`2025-06-05T19:30:00Z`) and zone-less local date-times
/// (`2025-06-05T19:30:00`, read as UTC). Serializes as RFC 3339.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_api_event() {
        let json = r#"{
            "id": 7,
            "title": "Jazz Night",
            "startedAt": "2025-06-05T19:30:00",
            "publishedAt": "2025-05-01T08:00:00Z",
            "venue": "Blue Hall",
            "posterName": "jazz.png",
            "format": { "id": 1, "title": "Concert" },
            "themes": [{ "id": 3, "title": "Jazz" }, { "id": 4, "title": "Live" }],
            "price": 10
        }"#;

        let event: EventSummary = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, 7);
        assert_eq!(event.started_at, Utc.with_ymd_and_hms(2025, 6, 5, 19, 30, 0).unwrap());
        assert_eq!(event.poster_name.as_deref(), Some("jazz.png"));
        assert_eq!(event.format, Label::new("Concert"));
        assert_eq!(event.themes.len(), 2);
        assert_eq!(DisplayItem::id(&event), ItemId::from(7));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "id": 1,
            "title": "Untitled",
            "startedAt": "2025-01-01T10:00:00Z",
            "publishedAt": "2025-01-01T09:00:00Z",
            "posterName": null,
            "format": { "title": "Talk" }
        }"#;

        let event: EventSummary = serde_json::from_str(json).unwrap();

        assert!(event.poster_name.is_none());
        assert!(event.themes.is_empty());
        assert!(event.venue.is_empty());
    }

    #[test]
    fn test_rejects_garbage_timestamp() {
        let json = r#"{
            "id": 1, "title": "x", "startedAt": "tomorrow",
            "publishedAt": "2025-01-01T09:00:00Z", "format": { "title": "Talk" }
        }"#;

        let err = serde_json::from_str::<EventSummary>(json).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn test_timestamp_accepts_fractional_seconds() {
        assert_eq!(
            timestamp::parse("2025-03-01T12:00:00.250"),
            Utc.timestamp_millis_opt(1_740_830_400_250).single()
        );
    }
}
