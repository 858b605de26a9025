//! Request execution with per-attempt timeout, linear retry and a uniform
//! result envelope
//!
//! # State machine
//!
//! ```text
//! Idle → Attempting                on execute()
//! Attempting → Success             2xx response
//! Attempting → Retrying            transport fault, attempts remaining
//! Retrying → Attempting            after the backoff pause
//! Attempting → Failed              non-2xx response, internal error,
//!                                  missing endpoint, cancellation,
//!                                  or transport fault with no attempts left
//! ```
//!
//! Only transport faults (DNS, connect, timeout, broken body) are retried.
//! Application responses are returned as-is whatever their status code.

pub mod decode;

use std::sync::Arc;
use std::time::Duration;

use courier_domain::{CourierError, RequestSpec, ResponseEnvelope, Result};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::backoff::BackoffSchedule;
use crate::transport::{Transport, TransportError, TransportProvider, WireRequest, WireResponse};

const CANCELLED_MESSAGE: &str = "request was cancelled";
const MISSING_ENDPOINT_MESSAGE: &str = "request endpoint is not set";

type Decoder<T> = fn(&WireResponse) -> std::result::Result<T, String>;

/// Result of racing one attempt against its timeout and the cancel token
enum AttemptOutcome {
    Completed(WireResponse),
    Failed(TransportError),
    Cancelled,
}

/// Orchestrates attempts for one [`RequestSpec`] at a time
///
/// The executor holds no per-call state; one instance can serve any number
/// of concurrent calls; only the injected transports are shared.
#[derive(Clone)]
pub struct RequestExecutor {
    transports: Arc<dyn TransportProvider>,
}

impl RequestExecutor {
    pub fn new(transports: Arc<dyn TransportProvider>) -> Self {
        Self { transports }
    }

    /// Execute an optional spec.
    ///
    /// # Errors
    /// Returns `CourierError::InvalidInput` when `spec` is `None`. Every
    /// other condition is reported inside the envelope.
    pub async fn try_execute<T: DeserializeOwned>(
        &self,
        spec: Option<&RequestSpec>,
        cancel: &CancellationToken,
    ) -> Result<ResponseEnvelope<T>> {
        let spec =
            spec.ok_or_else(|| CourierError::InvalidInput("request spec is required".into()))?;
        Ok(self.execute(spec, cancel).await)
    }

    /// Execute `spec` and decode a 2xx JSON body into `T`.
    ///
    /// A 2xx body that does not decode into `T` yields a 500 envelope. This
    /// includes `()` against a non-empty JSON body; callers that do not need
    /// the payload should ask for [`serde::de::IgnoredAny`] or use
    /// [`Self::execute_bytes`].
    pub async fn execute<T: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
        cancel: &CancellationToken,
    ) -> ResponseEnvelope<T> {
        self.run(spec, cancel, decode::decode_json::<T>).await
    }

    /// Execute `spec` and return the body as text.
    pub async fn execute_text(
        &self,
        spec: &RequestSpec,
        cancel: &CancellationToken,
    ) -> ResponseEnvelope<String> {
        self.run(spec, cancel, decode::decode_text).await
    }

    /// Execute `spec` and return the raw body.
    pub async fn execute_bytes(
        &self,
        spec: &RequestSpec,
        cancel: &CancellationToken,
    ) -> ResponseEnvelope<Vec<u8>> {
        self.run(spec, cancel, decode::decode_bytes).await
    }

    #[instrument(
        skip_all,
        fields(method = %spec.method, endpoint = spec.endpoint.as_deref().unwrap_or("<unset>"))
    )]
    async fn run<T>(
        &self,
        spec: &RequestSpec,
        cancel: &CancellationToken,
        decode: Decoder<T>,
    ) -> ResponseEnvelope<T> {
        if spec.endpoint.is_none() {
            warn!("Request rejected: endpoint is not set");
            return ResponseEnvelope::internal_error(MISSING_ENDPOINT_MESSAGE);
        }

        let schedule = BackoffSchedule::new(spec.retry_policy);
        let total_attempts = spec.retry_policy.total_attempts();
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                info!(attempt = attempt + 1, "Request cancelled before attempt");
                return ResponseEnvelope::transport_failure(CANCELLED_MESSAGE);
            }

            let request = match WireRequest::from_spec(spec) {
                Ok(request) => request,
                Err(err) => {
                    warn!(error = %err, "Failed to build wire request");
                    return ResponseEnvelope::internal_error(err.to_string());
                }
            };

            let transport = self.transports.get(spec.enable_compression);
            debug!(
                attempt = attempt + 1,
                total_attempts,
                transport = transport.name(),
                "Sending request"
            );

            match Self::attempt(transport.as_ref(), request, spec.timeout_per_attempt, cancel).await
            {
                AttemptOutcome::Completed(response) => {
                    info!(attempt = attempt + 1, status = response.status, "Request completed");
                    return Self::complete(response, decode);
                }
                AttemptOutcome::Cancelled => {
                    info!(attempt = attempt + 1, "Request cancelled in flight");
                    return ResponseEnvelope::transport_failure(CANCELLED_MESSAGE);
                }
                AttemptOutcome::Failed(err) if err.is_transport_fault() => {
                    if !schedule.has_remaining(attempt) {
                        warn!(
                            attempt = attempt + 1,
                            error = %err,
                            "Transport failure, attempts exhausted"
                        );
                        return ResponseEnvelope::transport_failure(err.to_string());
                    }

                    let delay = schedule.delay_after(attempt);
                    warn!(attempt = attempt + 1, error = %err, ?delay, "Transport failure, retrying");
                    if schedule.wait(attempt, cancel).await.is_err() {
                        info!(attempt = attempt + 1, "Request cancelled during backoff");
                        return ResponseEnvelope::transport_failure(CANCELLED_MESSAGE);
                    }
                    attempt += 1;
                }
                AttemptOutcome::Failed(err) => {
                    warn!(attempt = attempt + 1, error = %err, "Internal failure, not retrying");
                    return ResponseEnvelope::internal_error(err.to_string());
                }
            }
        }
    }

    /// Race the transport call against the per-attempt timeout and the
    /// cancel token. The losing branches drop the in-flight future.
    async fn attempt(
        transport: &dyn Transport,
        request: WireRequest,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> AttemptOutcome {
        tokio::select! {
            () = cancel.cancelled() => AttemptOutcome::Cancelled,
            result = tokio::time::timeout(timeout, transport.send(request)) => match result {
                Ok(Ok(response)) => AttemptOutcome::Completed(response),
                Ok(Err(err)) => AttemptOutcome::Failed(err),
                Err(_) => AttemptOutcome::Failed(TransportError::Timeout(timeout)),
            },
        }
    }

    fn complete<T>(response: WireResponse, decode: Decoder<T>) -> ResponseEnvelope<T> {
        if !response.is_success() {
            let message = Self::status_message(&response);
            return ResponseEnvelope::failure(response.status, response.reason, message);
        }

        match decode(&response) {
            Ok(data) => ResponseEnvelope::success(response.status, response.reason, data),
            Err(message) => {
                warn!(status = response.status, error = %message, "Failed to decode payload");
                ResponseEnvelope::internal_error(message)
            }
        }
    }

    fn status_message(response: &WireResponse) -> String {
        let body = response.text();
        let body = body.trim();
        if body.is_empty() {
            format!("remote returned status {}", response.status)
        } else {
            body.to_string()
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}
