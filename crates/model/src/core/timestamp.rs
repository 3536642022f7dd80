use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub const BANNER_PREFIX: &str = "Last Updated: ";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Freshness marker written above the published table.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    at: DateTime<Tz>,
}

impl Timestamp {
    pub fn now(tz: Tz) -> Self {
        Self::from_utc(Utc::now(), tz)
    }

    pub fn from_utc(at: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            at: at.with_timezone(&tz),
        }
    }

    pub fn formatted(&self) -> String {
        self.at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Text for the banner cell, e.g. `Last Updated: 2024-05-01 09:30:00`.
    pub fn banner(&self) -> String {
        format!("{BANNER_PREFIX}{}", self.formatted())
    }
}
