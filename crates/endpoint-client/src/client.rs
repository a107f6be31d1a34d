//! Endpoint client

use std::fmt;
use std::sync::Arc;

use endpoint_builder::{resolve_path, Endpoint, NoContent, RequestBody};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::base_url::BaseUrl;
use crate::codec::{Decoder, DecoderFactory, Encoder, EncoderFactory, JsonDecoder, JsonEncoder};
use crate::error::Error;
use crate::request::{header_value, OutgoingRequest};
use crate::response::{Decoded, Response, TransportResponse};
use crate::transport::{self, Transport, TransportFactory};

/// Client executing [`Endpoint`]s against a server
///
/// Immutable once built and cheap to clone. A fresh transport handle, encoder
/// and decoder are produced from the configured factories for every request,
/// so one client can be shared by any number of concurrent callers.
pub struct EndpointClient<E = JsonEncoder, D = JsonDecoder> {
    base_url: BaseUrl,
    transport: TransportFactory,
    encoder: EncoderFactory<E>,
    decoder: DecoderFactory<D>,
}

impl<E, D> Clone for EndpointClient<E, D> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: self.transport.clone(),
            encoder: self.encoder.clone(),
            decoder: self.decoder.clone(),
        }
    }
}

impl<E, D> fmt::Debug for EndpointClient<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl EndpointClient {
    /// Create a client with the shared reqwest transport and JSON codecs
    #[cfg(feature = "reqwest")]
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            transport: default_transport(),
            encoder: Arc::new(JsonEncoder::new),
            decoder: Arc::new(JsonDecoder::new),
        }
    }

    /// Create a new client builder
    pub fn builder(base_url: BaseUrl) -> EndpointClientBuilder {
        EndpointClientBuilder {
            base_url,
            transport: None,
            encoder: Arc::new(JsonEncoder::new),
            decoder: Arc::new(JsonDecoder::new),
        }
    }
}

impl<E, D> EndpointClient<E, D>
where
    E: Encoder,
    D: Decoder,
{
    /// Server base URL
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Assemble the request for an endpoint without sending it
    ///
    /// Sets `Content-Type` only when the endpoint has a body and
    /// `Authorization` only when it provides one. No other header is added.
    pub fn build_request<P>(&self, endpoint: &P) -> Response<OutgoingRequest>
    where
        P: Endpoint,
    {
        let url = self.base_url.join(resolve_path(endpoint)?)?;
        let mut request = OutgoingRequest::new(P::METHOD, url);

        if let Some(content) = endpoint.body().content() {
            let encoder = (self.encoder)();
            let body = encoder
                .encode(content)
                .map_err(|e| Error::Encoding(e.into()))?;
            let content_type = header_value(encoder.content_type())
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", CONTENT_TYPE, e)))?;

            request.headers.insert(CONTENT_TYPE, content_type);
            request.body = Some(body);
        }

        if let Some(authorization) = endpoint.authorization() {
            let mut value = header_value(&authorization.header_value())
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", AUTHORIZATION, e)))?;
            value.set_sensitive(true);

            request.headers.insert(AUTHORIZATION, value);
        }

        Ok(request)
    }

    /// Send the request for an endpoint and return the raw response
    ///
    /// A single attempt: transport failures are returned as they are.
    #[instrument(skip(self, endpoint), fields(base_url = %self.base_url, method = %P::METHOD))]
    pub async fn execute<P>(&self, endpoint: &P) -> Response<TransportResponse>
    where
        P: Endpoint,
    {
        let request = self.build_request(endpoint)?;
        tracing::debug!(url = %request.url, "Sending request");

        let transport = (self.transport)();
        let response = transport.send(request).await?;
        tracing::trace!(
            status = %response.meta.status,
            bytes = response.body.len(),
            "Received response"
        );

        Ok(response)
    }

    /// Request an endpoint that declares no response
    ///
    /// The response body is discarded.
    pub async fn send<P>(&self, endpoint: &P) -> Response<()>
    where
        P: Endpoint<Response = NoContent>,
    {
        self.execute(endpoint).await.map(|_| ())
    }

    /// Request an endpoint and decode its response
    pub async fn request<P>(&self, endpoint: &P) -> Response<P::Response>
    where
        P: Endpoint,
        P::Response: DeserializeOwned,
    {
        self.request_with_meta(endpoint)
            .await
            .map(Decoded::into_value)
    }

    /// Request an endpoint and decode its response, keeping the response metadata
    pub async fn request_with_meta<P>(&self, endpoint: &P) -> Response<Decoded<P::Response>>
    where
        P: Endpoint,
        P::Response: DeserializeOwned,
    {
        let TransportResponse { meta, body } = self.execute(endpoint).await?;

        let decoded = (self.decoder)().decode::<P::Response>(&body);
        match decoded {
            Ok(value) => Ok(Decoded { value, meta }),
            Err(err) => {
                tracing::debug!(status = %meta.status, "Unable to decode response: {}", err);
                Err(Error::Decoding {
                    data: body,
                    meta: Some(meta),
                    source: err.into(),
                })
            }
        }
    }
}

/// Builder for an [`EndpointClient`]
pub struct EndpointClientBuilder<E = JsonEncoder, D = JsonDecoder> {
    base_url: BaseUrl,
    transport: Option<TransportFactory>,
    encoder: EncoderFactory<E>,
    decoder: DecoderFactory<D>,
}

impl<E, D> fmt::Debug for EndpointClientBuilder<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointClientBuilder")
            .field("base_url", &self.base_url)
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl<E, D> EndpointClientBuilder<E, D>
where
    E: Encoder,
    D: Decoder,
{
    /// Use one transport for every request
    pub fn transport<T>(mut self, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        self.transport = Some(transport::shared(transport));
        self
    }

    /// Produce the transport for each request from a factory
    pub fn transport_factory(mut self, factory: TransportFactory) -> Self {
        self.transport = Some(factory);
        self
    }

    /// Produce the request body encoder from a factory
    pub fn encoder<E2, F>(self, factory: F) -> EndpointClientBuilder<E2, D>
    where
        E2: Encoder,
        F: Fn() -> E2 + Send + Sync + 'static,
    {
        EndpointClientBuilder {
            base_url: self.base_url,
            transport: self.transport,
            encoder: Arc::new(factory),
            decoder: self.decoder,
        }
    }

    /// Produce the response body decoder from a factory
    pub fn decoder<D2, F>(self, factory: F) -> EndpointClientBuilder<E, D2>
    where
        D2: Decoder,
        F: Fn() -> D2 + Send + Sync + 'static,
    {
        EndpointClientBuilder {
            base_url: self.base_url,
            transport: self.transport,
            encoder: self.encoder,
            decoder: Arc::new(factory),
        }
    }

    /// Build the client
    ///
    /// Without an explicit transport the shared reqwest transport is used,
    /// or [`Error::MissingTransport`] is returned when the `reqwest` feature
    /// is disabled.
    pub fn build(self) -> Response<EndpointClient<E, D>> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => fallback_transport()?,
        };

        Ok(EndpointClient {
            base_url: self.base_url,
            transport,
            encoder: self.encoder,
            decoder: self.decoder,
        })
    }
}

#[cfg(feature = "reqwest")]
fn default_transport() -> TransportFactory {
    transport::shared(transport::ReqwestTransport::shared())
}

#[cfg(feature = "reqwest")]
fn fallback_transport() -> Response<TransportFactory> {
    Ok(default_transport())
}

#[cfg(not(feature = "reqwest"))]
fn fallback_transport() -> Response<TransportFactory> {
    Err(Error::MissingTransport)
}
