//! Response types

use http::{HeaderMap, StatusCode};
use url::Url;

use crate::error::Error;

/// Result type of client operations
pub type Response<R, E = Error> = Result<R, E>;

/// Response metadata reported by a transport
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL, after any redirects the transport followed
    pub url: Option<Url>,
}

impl ResponseMeta {
    /// Metadata with a status and no headers
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            url: None,
        }
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}

/// Raw bytes and metadata returned by a transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response metadata
    pub meta: ResponseMeta,
    /// Response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Create a response from its parts
    pub fn new(meta: ResponseMeta, body: impl Into<Vec<u8>>) -> Self {
        Self {
            meta,
            body: body.into(),
        }
    }

    /// A `200 OK` response with the given body
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(ResponseMeta::default(), body)
    }
}

/// A decoded value with the metadata of the response it came from
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    /// Decoded body
    pub value: T,
    /// Response metadata
    pub meta: ResponseMeta,
}

impl<T> Decoded<T> {
    /// Drop the metadata
    pub fn into_value(self) -> T {
        self.value
    }
}
