//! RFC 3339 timestamps as the API writes them (`2024-05-01T10:00:00.000Z`).
//!
//! Use with `#[serde(with = "timestamp")]`; optional fields use
//! [`option`], which also reads an empty string as "absent".

use serde::{Deserialize, Deserializer, Serializer, de, ser};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn parse(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(text.trim(), &Rfc3339)
}

pub fn format(value: &OffsetDateTime) -> Result<String, time::error::Format> {
    value.format(&Rfc3339)
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = format(value).map_err(ser::Error::custom)?;
    serializer.serialize_str(&text)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(de::Error::custom)
}

/// Like [`deserialize`], but a `null` or empty value reads as the current
/// time.
pub fn deserialize_or_now<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) if !text.trim().is_empty() => parse(&text).map_err(de::Error::custom),
        _ => Ok(OffsetDateTime::now_utc()),
    }
}

pub mod option {
    use super::{Deserialize, Deserializer, OffsetDateTime, Serializer, de, ser};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => {
                let text = super::format(value).map_err(ser::Error::custom)?;
                serializer.serialize_some(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.trim().is_empty() => {
                super::parse(&text).map(Some).map_err(de::Error::custom)
            }
            _ => Ok(None),
        }
    }
}
