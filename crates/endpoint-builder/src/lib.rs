//! Typed descriptions of HTTP API endpoints
//!
//! An [`Endpoint`] describes one API operation: its path, method, request body
//! type, response type and optional authorization. Clients consume these
//! descriptions to build and execute requests.
//!
//! # Example
//!
//! ```
//! use endpoint_builder::{Endpoint, Method, NoBody, PathComponent, PathParameters};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! struct GetUser {
//!     id: String,
//! }
//!
//! impl Endpoint for GetUser {
//!     type Body = NoBody;
//!     type Response = User;
//!
//!     const METHOD: Method = Method::GET;
//!     const PATH: &'static [PathComponent] = &[
//!         PathComponent::Constant("users"),
//!         PathComponent::Parameter("id"),
//!     ];
//!
//!     fn body(&self) -> &NoBody {
//!         &NoBody
//!     }
//!
//!     fn path_parameters(&self) -> PathParameters {
//!         PathParameters::new().with("id", &self.id)
//!     }
//! }
//!
//! let endpoint = GetUser { id: "42".to_string() };
//! assert_eq!(
//!     endpoint_builder::resolve_path(&endpoint).expect("all parameters set"),
//!     vec!["users".to_string(), "42".to_string()]
//! );
//! ```

mod auth;
mod endpoint;
mod path;

pub use auth::Authorization;
pub use endpoint::{Endpoint, NoBody, NoContent, RequestBody};
pub use http::Method;
pub use path::{resolve_path, PathComponent, PathError, PathParameters};
