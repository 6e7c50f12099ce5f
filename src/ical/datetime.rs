//! Date and date-time values as iCal carries them

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_TIME_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// A point in time as an iCal property carries it: either a whole day
/// (`VALUE=DATE`, e.g. `20210310`) or a UTC timestamp (e.g.
/// `20210310T144523Z`).
///
/// Date-time values without the trailing `Z` are accepted and treated as UTC,
/// since several servers emit them that way. Values localized with a `TZID`
/// parameter get the same treatment; this crate does not do time-zone math.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalDateTime {
    /// An all-day value, carrying no time of day
    Date(NaiveDate),
    /// An exact timestamp, normalized to UTC
    Utc(DateTime<Utc>),
}

impl CalDateTime {
    /// The current instant, truncated to whole seconds (the wire format does
    /// not carry sub-second precision)
    pub fn now() -> Self {
        match Utc::now().with_nanosecond(0) {
            Some(now) => CalDateTime::Utc(now),
            // Zeroing nanoseconds cannot fail, but avoid panicking on it
            None => CalDateTime::Utc(Utc::now()),
        }
    }

    /// Parses the iCal text forms. Returns `None` when the value matches
    /// neither the date nor the date-time shape.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, DATE_TIME_UTC_FORMAT) {
            return Some(CalDateTime::Utc(Utc.from_utc_datetime(&parsed)));
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT) {
            return Some(CalDateTime::Utc(Utc.from_utc_datetime(&parsed)));
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .map(CalDateTime::Date)
    }

    /// Whether this is an all-day (`VALUE=DATE`) value
    pub fn is_date_only(&self) -> bool {
        matches!(self, CalDateTime::Date(_))
    }
}

impl fmt::Display for CalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalDateTime::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            CalDateTime::Utc(stamp) => write!(f, "{}", stamp.format(DATE_TIME_UTC_FORMAT)),
        }
    }
}

impl FromStr for CalDateTime {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| Error::Format(format!("invalid date value '{}'", value)))
    }
}

impl From<DateTime<Utc>> for CalDateTime {
    fn from(stamp: DateTime<Utc>) -> Self {
        CalDateTime::Utc(stamp)
    }
}

impl From<NaiveDate> for CalDateTime {
    fn from(date: NaiveDate) -> Self {
        CalDateTime::Date(date)
    }
}

impl Serialize for CalDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
