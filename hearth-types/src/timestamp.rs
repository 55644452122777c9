//! Wall-clock timestamps for entity bookkeeping.
//!
//! Timestamps are naive UTC values truncated to whole microseconds, so the
//! ISO-8601 text produced by [`Timestamp::to_iso`] parses back to an equal
//! value. [`Timestamp::tick`] gives the monotonic step used when an entity
//! is saved.

use crate::{Error, Result};
use chrono::{NaiveDateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Text layout used on disk: `2017-09-28T21:03:54.052298`.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Accepted on input; the fractional part is optional.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A microsecond-precision UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Creates a timestamp at the current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().naive_utc().trunc_subsecs(6))
    }

    /// Wraps an existing value, dropping anything finer than a microsecond.
    #[must_use]
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self(value.trunc_subsecs(6))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Parses the canonical ISO-8601 text form.
    pub fn parse(s: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(s, PARSE_FORMAT)
            .map(Self::from_naive)
            .map_err(|_| Error::InvalidTimestamp(s.to_owned()))
    }

    /// Renders the canonical ISO-8601 text form, always with six
    /// fractional digits.
    #[must_use]
    pub fn to_iso(&self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    /// Returns a timestamp strictly after this one.
    ///
    /// This is the current time when the clock has moved past `self`,
    /// otherwise `self` plus one microsecond.
    #[must_use]
    pub fn tick(&self) -> Self {
        let now = Self::now();
        if now > *self {
            now
        } else {
            Self(self.0 + TimeDelta::microseconds(1))
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// The value form, `2017-09-28 21:03:54.052298`. Use [`Timestamp::to_iso`]
/// for the text stored on disk.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.6f"))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_naive(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
