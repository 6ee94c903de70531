use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Identity assigned by the store; positive and never reused within a table.
pub type RecordId = i64;

/// Calendar-only pattern used on screen and in exported documents.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Exchange format for persisted instants. Local wall-clock, second precision,
/// no offset, so a stored value reads back exactly as written.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Entities that expose a stable store identity.
pub trait Identifiable {
    fn id(&self) -> RecordId;
}

/// Entities stamped with the instant they refer to.
pub trait Dated {
    fn date(&self) -> NaiveDateTime;
}

pub fn format_display_date(instant: NaiveDateTime) -> String {
    instant.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Parses `DD/MM/YYYY` into midnight of that day.
pub fn parse_display_date(input: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(input.trim(), DISPLAY_DATE_FORMAT)
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Drops sub-second precision so the instant survives the exchange format.
pub fn truncate_to_second(instant: NaiveDateTime) -> NaiveDateTime {
    instant.with_nanosecond(0).unwrap_or(instant)
}

/// Serde adapter pinning [`TIMESTAMP_FORMAT`] for record dates.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(instant: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&instant.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
