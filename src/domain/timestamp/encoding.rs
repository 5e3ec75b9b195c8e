// src/domain/timestamp/encoding.rs
//
// Persisted timestamp encoding.
//
// Planner data written by earlier releases stores dates as a JSON number of
// seconds since 2001-01-01T00:00:00Z. We keep writing that shape and also
// accept RFC 3339 strings when reading. Timestamps are held at the value the
// encoding reproduces (microseconds, or coarser for far-future dates) so a
// write followed by a read yields the same value.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z
const REFERENCE_DATE_UNIX_SECONDS: i64 = 978_307_200;

fn reference_date() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(REFERENCE_DATE_UNIX_SECONDS)
}

/// Upper bound on re-encoding passes in `normalize`
const MAX_NORMALIZE_PASSES: usize = 4;

/// Clamp a timestamp to the value the persisted encoding reproduces.
///
/// Microsecond precision up to roughly the year 2270; beyond that the f64
/// seconds lose sub-microsecond steps and the stored value is coarser.
pub fn normalize(date: DateTime<Utc>) -> DateTime<Utc> {
    let mut current = date.trunc_subsecs(6);
    for _ in 0..MAX_NORMALIZE_PASSES {
        let next = match encode_seconds(current).and_then(from_reference_seconds) {
            Some(next) => next,
            None => return current,
        };
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn encode_seconds(date: DateTime<Utc>) -> Option<f64> {
    (date.trunc_subsecs(6) - reference_date())
        .num_microseconds()
        .map(|micros| micros as f64 / 1_000_000.0)
}

/// Seconds since the reference date, as written to storage
pub fn to_reference_seconds(date: DateTime<Utc>) -> Option<f64> {
    encode_seconds(normalize(date))
}

pub fn from_reference_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * 1_000_000.0).round();
    if micros.abs() > i64::MAX as f64 {
        return None;
    }
    reference_date().checked_add_signed(Duration::microseconds(micros as i64))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(f64),
    Text(String),
}

/// `#[serde(with = "reference_date")]` adapter for `DateTime<Utc>` fields
pub mod reference_date {
    use super::*;

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let seconds = to_reference_seconds(*date)
            .ok_or_else(|| serde::ser::Error::custom("timestamp out of range"))?;
        serializer.serialize_f64(seconds)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Seconds(seconds) => from_reference_seconds(seconds)
                .map(normalize)
                .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", seconds))),
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| normalize(dt.with_timezone(&Utc)))
                .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", text, e))),
        }
    }
}

/// A single stored timestamp (the pending planner date entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredTimestamp(#[serde(with = "reference_date")] pub DateTime<Utc>);
