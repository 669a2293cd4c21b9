use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One logged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
}

/// Serializes instants as RFC 3339 UTC with millisecond precision,
/// e.g. `2024-02-29T23:00:00.000Z`.
pub mod timestamp_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days_in_month: u32,
    /// Weekday of the 1st, 0 = Sunday .. 6 = Saturday.
    pub first_weekday: u32,
    pub today: Option<u32>,
    pub counts: BTreeMap<u32, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryView {
    pub id: i64,
    pub timestamp: String,
    pub local_date: String,
    pub local_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayView {
    pub date: String,
    pub is_today: bool,
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DayQuery {
    pub date: Option<String>,
}
