//! Bridge for callback-based executors

use std::fmt::Debug;

use tokio::sync::oneshot;

use super::Transport;
use crate::error::TransportError;
use crate::request::OutgoingRequest;
use crate::response::{ResponseMeta, TransportResponse};

type Outcome = Result<TransportResponse, TransportError>;

/// Starts requests and reports the outcome through a [`Completion`]
///
/// `execute` must return promptly. The completion may be fired from any
/// thread, at most once (it is consumed when fired).
pub trait CallbackExecutor: Send + Sync + Debug {
    /// Start a request
    fn execute(&self, request: OutgoingRequest, completion: Completion);
}

/// Single-use completion handle for a callback request
#[derive(Debug)]
pub struct Completion {
    sender: oneshot::Sender<Outcome>,
}

impl Completion {
    /// Report the callback arguments
    ///
    /// An error always wins. Data and metadata together are a response. Any
    /// other combination, including nothing at all, resolves to
    /// [`TransportError::NoResponse`].
    pub fn complete(
        self,
        data: Option<Vec<u8>>,
        meta: Option<ResponseMeta>,
        error: Option<TransportError>,
    ) {
        let outcome = match (data, meta, error) {
            (_, _, Some(error)) => Err(error),
            (Some(data), Some(meta), None) => Ok(TransportResponse::new(meta, data)),
            _ => Err(TransportError::NoResponse),
        };
        self.resolve(outcome);
    }

    /// Report a response
    pub fn succeed(self, response: TransportResponse) {
        self.resolve(Ok(response));
    }

    /// Report a failure
    pub fn fail(self, error: TransportError) {
        self.resolve(Err(error));
    }

    fn resolve(self, outcome: Outcome) {
        if self.sender.send(outcome).is_err() {
            tracing::trace!("Callback completed after the request was dropped");
        }
    }
}

/// Adapts a [`CallbackExecutor`] to [`Transport`]
///
/// The calling task suspends until the completion fires. A completion that is
/// dropped without firing resolves to [`TransportError::NoResponse`].
#[derive(Debug, Clone)]
pub struct CallbackTransport<X> {
    executor: X,
}

impl<X> CallbackTransport<X>
where
    X: CallbackExecutor,
{
    /// Wrap an executor
    pub fn new(executor: X) -> Self {
        Self { executor }
    }

    /// Wrapped executor
    pub fn executor(&self) -> &X {
        &self.executor
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl<X> Transport for CallbackTransport<X>
where
    X: CallbackExecutor,
{
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        let (sender, receiver) = oneshot::channel();
        self.executor.execute(request, Completion { sender });

        receiver.await.map_err(|_| TransportError::NoResponse)?
    }
}
