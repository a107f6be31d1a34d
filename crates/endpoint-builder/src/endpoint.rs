//! Endpoint description

use http::Method;
use serde::Serialize;

use crate::auth::Authorization;
use crate::path::{PathComponent, PathParameters};

/// Marker for endpoints that send no request body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBody;

/// Marker for endpoints that declare no response type
///
/// It does not implement `Deserialize`, so clients cannot decode a typed
/// response for an endpoint using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoContent {}

/// Request body of an endpoint
///
/// Every `Serialize` type is a body. [`NoBody`] is the only body without
/// content.
pub trait RequestBody {
    /// Serializable content
    type Content: Serialize + ?Sized;

    /// Content to serialize, `None` when no body is sent
    fn content(&self) -> Option<&Self::Content>;
}

impl<T> RequestBody for T
where
    T: Serialize,
{
    type Content = T;

    fn content(&self) -> Option<&T> {
        Some(self)
    }
}

impl RequestBody for NoBody {
    type Content = ();

    fn content(&self) -> Option<&()> {
        None
    }
}

/// Typed description of one API operation
pub trait Endpoint: Send + Sync {
    /// Request body, [`NoBody`] when none is sent
    type Body: RequestBody;
    /// Response type, [`NoContent`] when none is expected
    type Response;

    /// HTTP method
    const METHOD: Method;
    /// Path components, relative to the server base URL
    const PATH: &'static [PathComponent];

    /// Request body
    fn body(&self) -> &Self::Body;

    /// Values for the parameter components of [`Endpoint::PATH`]
    fn path_parameters(&self) -> PathParameters {
        PathParameters::default()
    }

    /// Authorization for the request
    fn authorization(&self) -> Option<Authorization> {
        None
    }
}
