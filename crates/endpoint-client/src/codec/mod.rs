//! Request and response body codecs
//!
//! Clients hold factories rather than codec instances: every request builds a
//! fresh [`Encoder`] and [`Decoder`], so configuration such as the
//! [`DateStrategy`] is never shared between concurrent calls.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod date;

pub use date::DateStrategy;

/// Content type of JSON bodies
pub const APPLICATION_JSON: &str = "application/json";

/// Serializes request bodies
pub trait Encoder {
    /// Encoding error
    type Error: std::error::Error + Send + Sync + 'static;

    /// `Content-Type` of the encoded bytes
    fn content_type(&self) -> &str {
        APPLICATION_JSON
    }

    /// Encode a value
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, Self::Error>
    where
        T: Serialize + ?Sized;
}

/// Deserializes response bodies
pub trait Decoder {
    /// Decoding error
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decode a value
    fn decode<T>(&self, data: &[u8]) -> Result<T, Self::Error>
    where
        T: DeserializeOwned;
}

/// Produces a fresh encoder for each request
pub type EncoderFactory<E> = Arc<dyn Fn() -> E + Send + Sync>;

/// Produces a fresh decoder for each request
pub type DecoderFactory<D> = Arc<dyn Fn() -> D + Send + Sync>;

/// JSON encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonEncoder {
    date_strategy: DateStrategy,
    pretty: bool,
}

impl JsonEncoder {
    /// Encoder with ISO-8601 dates and compact output
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how dates are written
    ///
    /// Applies only to fields annotated with
    /// `#[serde(with = "endpoint_client::codec::date")]` (or `date::option`).
    /// A plain `chrono::DateTime` field keeps chrono's own RFC 3339 encoding
    /// whatever the strategy.
    pub fn date_strategy(mut self, strategy: DateStrategy) -> Self {
        self.date_strategy = strategy;
        self
    }

    /// Pretty-print the output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Encoder for JsonEncoder {
    type Error = serde_json::Error;

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let _scope = date::scope(self.date_strategy);
        if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
    }
}

/// JSON decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonDecoder {
    date_strategy: DateStrategy,
}

impl JsonDecoder {
    /// Decoder expecting ISO-8601 dates
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how dates are read
    ///
    /// Applies only to fields annotated with
    /// `#[serde(with = "endpoint_client::codec::date")]` (or `date::option`).
    /// A plain `chrono::DateTime` field always expects chrono's RFC 3339 form.
    pub fn date_strategy(mut self, strategy: DateStrategy) -> Self {
        self.date_strategy = strategy;
        self
    }
}

impl Decoder for JsonDecoder {
    type Error = serde_json::Error;

    fn decode<T>(&self, data: &[u8]) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        let _scope = date::scope(self.date_strategy);
        serde_json::from_slice(data)
    }
}
