//! Transport handlers
//!
//! A [`Transport`] takes a fully formed [`OutgoingRequest`] and returns the raw
//! response, or fails. [`ReqwestTransport`] is the default implementation,
//! [`CallbackTransport`] adapts callback-style executors.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::TransportError;
use crate::request::OutgoingRequest;
use crate::response::TransportResponse;

mod callback;
#[cfg(feature = "reqwest")]
mod reqwest_backend;

pub use callback::{CallbackExecutor, CallbackTransport, Completion};
#[cfg(feature = "reqwest")]
pub use reqwest_backend::{ReqwestTransport, ReqwestTransportBuilder};

/// Executes requests
///
/// Implementations are invoked concurrently from many call sites and must be
/// stateless or internally synchronized. Cancellation is the implementation's
/// own: dropping the returned future abandons the call.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait Transport: Send + Sync + Debug {
    /// Send a request and return the raw response
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Produces the transport used for a request
///
/// Invoked once per request. Return the same handle every time to reuse one
/// transport, or build a new one per call.
pub type TransportFactory = Arc<dyn Fn() -> Arc<dyn Transport> + Send + Sync>;

/// Factory returning the same transport for every request
pub fn shared<T>(transport: T) -> TransportFactory
where
    T: Transport + 'static,
{
    let transport: Arc<dyn Transport> = Arc::new(transport);
    Arc::new(move || transport.clone())
}

/// Factory building a new transport for every request
pub fn per_call<T, F>(make: F) -> TransportFactory
where
    T: Transport + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(move || Arc::new(make()) as Arc<dyn Transport>)
}
