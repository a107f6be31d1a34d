//! Typed endpoint client over an injectable HTTP transport
//!
//! [`EndpointClient`] turns an [`Endpoint`] description into an
//! [`OutgoingRequest`], runs it through a [`Transport`] and decodes the
//! response into the endpoint's declared type.
//!
//! - Endpoints with no declared response are sent with
//!   [`EndpointClient::send`], the others with [`EndpointClient::request`].
//! - The transport is produced per request from a [`TransportFactory`]. By
//!   default every request goes through one shared [`ReqwestTransport`].
//! - Encoders and decoders are produced per request from factories. The
//!   default JSON codecs write dates as ISO-8601, see [`codec::date`].
//!
//! # Example
//!
//! ```no_run
//! use endpoint_builder::{Endpoint, Method, PathComponent, PathParameters};
//! use endpoint_client::{BaseUrl, EndpointClient};
//!
//! struct Echo {
//!     id: String,
//!     body: String,
//! }
//!
//! impl Endpoint for Echo {
//!     type Body = String;
//!     type Response = String;
//!
//!     const METHOD: Method = Method::POST;
//!     const PATH: &'static [PathComponent] = &[
//!         PathComponent::Constant("echo"),
//!         PathComponent::Parameter("id"),
//!     ];
//!
//!     fn body(&self) -> &String {
//!         &self.body
//!     }
//!
//!     fn path_parameters(&self) -> PathParameters {
//!         PathParameters::new().with("id", &self.id)
//!     }
//! }
//!
//! async fn example() -> Result<String, endpoint_client::Error> {
//!     let client = EndpointClient::new(BaseUrl::parse("https://api.example.com")?);
//!     client
//!         .request(&Echo {
//!             id: "my-ids".to_string(),
//!             body: "hello".to_string(),
//!         })
//!         .await
//! }
//! ```

mod base_url;
mod client;
pub mod codec;
mod error;
mod request;
mod response;
pub mod transport;

pub use base_url::BaseUrl;
pub use client::{EndpointClient, EndpointClientBuilder};
pub use codec::{DateStrategy, Decoder, Encoder, JsonDecoder, JsonEncoder};
pub use endpoint_builder::{
    Authorization, Endpoint, Method, NoBody, NoContent, PathComponent, PathParameters,
};
pub use error::{BoxError, CodecError, Error, TransportError};
pub use request::OutgoingRequest;
pub use response::{Decoded, ResponseMeta, Response, TransportResponse};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{CallbackTransport, Transport, TransportFactory};
