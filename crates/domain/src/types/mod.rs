//! Domain types and models

pub mod auth;
pub mod envelope;
pub mod request;
pub mod retry;

pub use auth::{AuthScheme, AuthenticationDirective};
pub use envelope::ResponseEnvelope;
pub use request::{HttpMethod, RequestSpec, RequestSpecBuilder};
pub use retry::RetryPolicy;
