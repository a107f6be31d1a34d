//! Date encoding
//!
//! Use as a serde field helper:
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "endpoint_client::codec::date")]
//!     at: DateTime<Utc>,
//!     #[serde(with = "endpoint_client::codec::date::option", default)]
//!     ended: Option<DateTime<Utc>>,
//! }
//! ```
//!
//! The representation follows the [`DateStrategy`] of the
//! [`JsonEncoder`](super::JsonEncoder) or [`JsonDecoder`](super::JsonDecoder)
//! running on the current thread. Outside of a codec call dates use
//! [`DateStrategy::Iso8601`].

use std::cell::Cell;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// How dates are represented in encoded bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateStrategy {
    /// RFC 3339 string in UTC, e.g. `2024-03-01T12:30:00Z`
    #[default]
    Iso8601,
    /// Whole seconds since the Unix epoch
    SecondsSinceEpoch,
    /// Milliseconds since the Unix epoch
    MillisecondsSinceEpoch,
}

thread_local! {
    static ACTIVE: Cell<Option<DateStrategy>> = const { Cell::new(None) };
}

/// Restores the previous strategy when dropped
#[derive(Debug)]
pub(crate) struct Scope {
    previous: Option<DateStrategy>,
}

/// Make `strategy` active on this thread until the returned scope drops
///
/// Encoding and decoding never suspend, so a thread-local scope cannot leak
/// into another request.
pub(crate) fn scope(strategy: DateStrategy) -> Scope {
    let previous = ACTIVE.with(|active| active.replace(Some(strategy)));
    Scope { previous }
}

impl Drop for Scope {
    fn drop(&mut self) {
        ACTIVE.with(|active| active.set(self.previous));
    }
}

/// Strategy in effect on the current thread
pub fn active_strategy() -> DateStrategy {
    ACTIVE.with(|active| active.get()).unwrap_or_default()
}

/// Serialize a date with the active strategy
pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match active_strategy() {
        DateStrategy::Iso8601 => {
            serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        DateStrategy::SecondsSinceEpoch => serializer.serialize_i64(date.timestamp()),
        DateStrategy::MillisecondsSinceEpoch => serializer.serialize_i64(date.timestamp_millis()),
    }
}

/// Deserialize a date with the active strategy
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match active_strategy() {
        DateStrategy::Iso8601 => {
            let value = String::deserialize(deserializer)?;
            DateTime::parse_from_rfc3339(&value)
                .map(|date| date.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        }
        DateStrategy::SecondsSinceEpoch => {
            let seconds = i64::deserialize(deserializer)?;
            DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
                serde::de::Error::custom(format!("timestamp out of range: {seconds}"))
            })
        }
        DateStrategy::MillisecondsSinceEpoch => {
            let millis = i64::deserialize(deserializer)?;
            DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                serde::de::Error::custom(format!("timestamp out of range: {millis}"))
            })
        }
    }
}

/// Optional dates
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Date(#[serde(with = "crate::codec::date")] DateTime<Utc>);

    /// Serialize an optional date with the active strategy
    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&Date(*date)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional date with the active strategy
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Date>::deserialize(deserializer)?.map(|date| date.0))
    }
}
