//! Wire timestamps.
//!
//! The Beowulf API serializes timestamps as the quoted string
//! `YYYYMMDDtHHMMSS` (UTC, second resolution); the canonical binary form is
//! a u32 little-endian Unix timestamp.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const WIRE_FORMAT: &str = "%Y%m%dt%H%M%S";

/// A second-resolution UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimePoint(DateTime<Utc>);

impl TimePoint {
    /// The current time, truncated to whole seconds.
    pub fn now() -> Self {
        Self::from_unix(Utc::now().timestamp())
    }

    pub fn from_unix(secs: i64) -> Self {
        // Seconds since epoch always fit chrono's range here.
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }

    /// Binary wire form: seconds since epoch as u32.
    pub fn as_u32(&self) -> u32 {
        self.0.timestamp() as u32
    }

    pub fn checked_add(&self, d: std::time::Duration) -> Self {
        Self::from_unix(self.unix() + d.as_secs() as i64)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl Serialize for TimePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format(WIRE_FORMAT))
    }
}

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&s, WIRE_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", s, e)))?;
        Ok(Self(naive.and_utc()))
    }
}
