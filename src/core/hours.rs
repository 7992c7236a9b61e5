use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A wall-clock time of day with minute resolution.
///
/// The backend stores opening hours as bare `HH:MM:SS` strings with no date
/// or timezone attached; seconds are accepted and discarded. Comparisons use
/// minutes-of-day, so ordering never crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

/// Why an `HH:MM[:SS]` string failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    #[error("expected HH:MM or HH:MM:SS, got {0:?}")]
    BadShape(String),

    #[error("non-numeric field in {0:?}")]
    NotANumber(String),

    #[error("hour out of range in {0:?}")]
    HourOutOfRange(String),

    #[error("minute out of range in {0:?}")]
    MinuteOutOfRange(String),
}

impl TimeOfDay {
    /// Build a time of day, rejecting out-of-range fields.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight (0..=1439), the classifier's comparison key.
    #[inline]
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// The current local wall-clock time, truncated to the minute.
    pub fn now() -> Self {
        use chrono::Timelike;
        let now = chrono::Local::now();
        Self {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 2 && fields.len() != 3 {
            return Err(ParseTimeError::BadShape(s.to_string()));
        }

        let hour: u8 = fields[0]
            .trim()
            .parse()
            .map_err(|_| ParseTimeError::NotANumber(s.to_string()))?;
        let minute: u8 = fields[1]
            .trim()
            .parse()
            .map_err(|_| ParseTimeError::NotANumber(s.to_string()))?;
        // A third field is seconds; validate it is numeric, then drop it.
        if fields.len() == 3 {
            let _: u8 = fields[2]
                .trim()
                .parse()
                .map_err(|_| ParseTimeError::NotANumber(s.to_string()))?;
        }

        if hour > 23 {
            return Err(ParseTimeError::HourOutOfRange(s.to_string()));
        }
        if minute > 59 {
            return Err(ParseTimeError::MinuteOutOfRange(s.to_string()));
        }

        Ok(Self { hour, minute })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Lenient deserializer for venue opening hours.
///
/// The backend occasionally holds hand-entered hour strings. A value that
/// does not parse degrades to "no posted hours" (the venue renders as
/// closed) instead of rejecting the whole snapshot. One warning is logged
/// naming the offending value.
pub fn lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TimeOfDay>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => match s.parse::<TimeOfDay>() {
            Ok(time) => Ok(Some(time)),
            Err(err) => {
                tracing::warn!("Unparseable opening-hours value {:?}: {}", s, err);
                Ok(None)
            }
        },
    }
}
