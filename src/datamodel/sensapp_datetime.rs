pub type SensAppDateTime = hifitime::Epoch;

pub trait SensAppDateTimeExt {
    fn from_unix_milliseconds_i64(timestamp: i64) -> Self;
    fn from_unix_seconds_i64(timestamp: i64) -> Self;
}

impl SensAppDateTimeExt for SensAppDateTime {
    fn from_unix_milliseconds_i64(timestamp: i64) -> Self {
        Self::from_utc_duration(UNIX_REF_EPOCH.to_utc_duration() + timestamp * Unit::Millisecond)
    }
    fn from_unix_seconds_i64(timestamp: i64) -> Self {
        Self::from_utc_duration(UNIX_REF_EPOCH.to_utc_duration() + timestamp * Unit::Second)
    }
}

use hifitime::{UNIX_REF_EPOCH, Unit};

/// Serde adapter writing a [`SensAppDateTime`] as unix milliseconds.
///
/// Instant vectors travel as JSON between the data source and the engine,
/// and a plain number is what every caller already has at hand.
pub mod unix_milliseconds {
    use super::SensAppDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(datetime: &SensAppDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(datetime.to_unix_milliseconds())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SensAppDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let milliseconds = f64::deserialize(deserializer)?;
        Ok(SensAppDateTime::from_unix_milliseconds(milliseconds))
    }
}
