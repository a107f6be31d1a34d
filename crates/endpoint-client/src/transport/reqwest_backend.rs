//! reqwest-based transport

use std::time::Duration;

use once_cell::sync::Lazy;
use url::Url;

use super::Transport;
use crate::error::TransportError;
use crate::request::OutgoingRequest;
use crate::response::{ResponseMeta, TransportResponse};

static SHARED_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Transport backed by a [`reqwest::Client`]
///
/// Every HTTP status is a completed exchange. Status codes are reported in
/// [`ResponseMeta`], only network level failures are errors.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::shared()
    }
}

impl ReqwestTransport {
    /// Transport using the process-wide shared client
    pub fn shared() -> Self {
        Self {
            inner: SHARED_CLIENT.clone(),
        }
    }

    /// Create a new transport builder
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Create a transport from a configured reqwest::Client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        let OutgoingRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let meta = ResponseMeta {
            status: response.status(),
            headers: response.headers().clone(),
            url: Some(response.url().clone()),
        };
        let body = response.bytes().await?;

        Ok(TransportResponse::new(meta, body.to_vec()))
    }
}

/// Builder for a [`ReqwestTransport`] with its own client
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    accept_invalid_certs: bool,
    #[cfg(not(target_arch = "wasm32"))]
    proxy: Option<Url>,
}

impl ReqwestTransportBuilder {
    /// Total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// `User-Agent` sent by the client
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Accept invalid TLS certificates (non-WASM only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Route every request through a proxy (non-WASM only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn proxy(mut self, url: Url) -> Self {
        self.proxy = Some(url);
        self
    }

    /// Build the transport
    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.danger_accept_invalid_certs(self.accept_invalid_certs);

            if let Some(proxy) = self.proxy {
                let proxy = reqwest::Proxy::all(proxy.as_str())
                    .map_err(|e| TransportError::Other(Box::new(e)))?;
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(Box::new(e)))?;
        Ok(ReqwestTransport { inner: client })
    }
}
