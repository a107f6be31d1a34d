//! Error types

use endpoint_builder::PathError;
use thiserror::Error;

use crate::response::ResponseMeta;

/// Boxed error kept as the source of another error
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed error raised by an encoder or decoder
pub type CodecError = BoxError;

/// Errors raised by a [`Transport`](crate::Transport)
///
/// The client never retries or rewraps these, callers receive them as
/// [`Error::Transport`]. The failure reported by the transport is kept as the
/// [`source`](std::error::Error::source) and can be downcast, e.g. to a
/// `reqwest::Error`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(#[source] BoxError),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(#[source] BoxError),
    /// The transport completed with neither a response nor an error
    #[error("No response")]
    NoResponse,
    /// Other error
    #[error("{0}")]
    Other(#[source] BoxError),
}

impl TransportError {
    /// The failure reported by the transport, if any
    pub fn inner(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Connection(err) | Self::Timeout(err) | Self::Other(err) => Some(err.as_ref()),
            Self::NoResponse => None,
        }
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(Box::new(err))
        } else if err.is_connect() {
            TransportError::Connection(Box::new(err))
        } else {
            TransportError::Other(Box::new(err))
        }
    }
}

/// Client errors
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be encoded, nothing was sent
    #[error("Unable to encode request body: {0}")]
    Encoding(#[source] CodecError),
    /// The transport failed
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The response body could not be decoded into the response type
    #[error("Unable to decode response body: {source}")]
    Decoding {
        /// Raw response body
        data: Vec<u8>,
        /// Response metadata
        meta: Option<ResponseMeta>,
        /// Decoder error
        #[source]
        source: CodecError,
    },
    /// The endpoint path could not be resolved, nothing was sent
    #[error(transparent)]
    Path(#[from] PathError),
    /// A header value could not be built, nothing was sent
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// No transport configured
    #[error("No transport configured")]
    MissingTransport,
}

impl Error {
    /// Raw body of a response that failed to decode
    pub fn response_data(&self) -> Option<&[u8]> {
        match self {
            Error::Decoding { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Body of a response that failed to decode, as lossy UTF-8
    pub fn body_text(&self) -> Option<String> {
        self.response_data()
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }

    /// Metadata of a response that failed to decode
    pub fn response_meta(&self) -> Option<&ResponseMeta> {
        match self {
            Error::Decoding { meta, .. } => meta.as_ref(),
            _ => None,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}
