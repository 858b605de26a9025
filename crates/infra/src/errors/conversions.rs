//! Conversions from `reqwest` errors into transport and domain errors.

use std::error::Error as StdError;

use courier_core::TransportError;
use courier_domain::CourierError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CourierError);

impl From<InfraError> for CourierError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CourierError> for InfraError {
    fn from(value: CourierError) -> Self {
        Self(value)
    }
}

/// Render the error together with its source chain.
///
/// `reqwest` keeps the interesting part (DNS failure, refused connection,
/// TLS alert) in the sources, not in its own message.
fn describe(err: &HttpError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

/// Classify a failed exchange for the retry decision.
///
/// Builder errors mean the request itself is malformed and are never
/// retried. Everything else is a transport fault.
pub fn classify_reqwest_error(err: &HttpError) -> TransportError {
    let message = describe(err);

    if err.is_builder() {
        return TransportError::Internal(message);
    }

    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return TransportError::Connect(message);
    }

    if err.is_timeout() {
        return TransportError::Request(format!("timed out: {message}"));
    }

    if err.is_body() || err.is_decode() {
        return TransportError::Body(message);
    }

    TransportError::Request(message)
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CourierError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let message = describe(&value);
        if value.is_builder() {
            Self(CourierError::Config(format!("failed to build HTTP client: {message}")))
        } else {
            Self(CourierError::Network(message))
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn malformed_url_is_internal() {
        let error = client().get("not a url").send().await.unwrap_err();

        match classify_reqwest_error(&error) {
            TransportError::Internal(_) => {}
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_connect_fault() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let error = client().get(format!("http://{addr}")).send().await.unwrap_err();
        let classified = classify_reqwest_error(&error);

        assert!(matches!(classified, TransportError::Connect(_)), "got {classified:?}");
        assert!(classified.is_transport_fault());
    }

    #[tokio::test]
    async fn client_timeout_is_transport_fault() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client =
            Client::builder().no_proxy().timeout(Duration::from_millis(50)).build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap_err();
        let classified = classify_reqwest_error(&error);

        match &classified {
            TransportError::Request(msg) => assert!(msg.starts_with("timed out")),
            other => panic!("expected request timeout, got {other:?}"),
        }
        assert!(classified.is_transport_fault());
    }

    #[tokio::test]
    async fn builder_error_maps_to_config_error() {
        let error = client().get("not a url").send().await.unwrap_err();
        let mapped: CourierError = InfraError::from(error).into();

        assert!(matches!(mapped, CourierError::Config(_)), "got {mapped:?}");
    }
}
