//! Transport and retry executor.
//!
//! [`HttpClient`] sends a fully built [`ResourceRequest`] and classifies the
//! outcome:
//!
//! - a status matching the [`ExpectedStatus`] is a success and the body is
//!   returned undecoded;
//! - transport failures and 5xx statuses are retried with exponential
//!   backoff until [`RetryPolicy::max_attempts`] is reached, then reported
//!   as [`MaxRetriesExceededError`];
//! - any other status is decoded into a [`RequestError`] and returned at
//!   once.
//!
//! An attached [`RequestContext`](crate::clients::RequestContext) is checked
//! before every attempt and raced against both the exchange and the backoff
//! sleep, so cancellation interrupts in-flight I/O.

use serde::Deserialize;

use crate::clients::context::ContextError;
use crate::clients::errors::{
    CosmosError, MaxRetriesExceededError, RequestError, TransportError,
};
use crate::clients::http_request::ResourceRequest;
use crate::clients::http_response::{ExpectedStatus, Response};
use crate::clients::retry::RetryPolicy;
use crate::config::CosmosConfig;
use crate::error::ConfigError;

/// Status, headers and raw body of a successful exchange.
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// Status and headers.
    pub response: Response,
    /// Undecoded body.
    pub body: Vec<u8>,
}

/// Error body returned by the service.
#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Outcome of one attempt that did not succeed.
enum Failure {
    Retryable { status: Option<u16>, message: String },
    Fatal(CosmosError),
}

/// HTTP client that executes signed requests.
///
/// The underlying `reqwest::Client` is built once and never mutated. It
/// pools connections internally and is safe to share, so one `HttpClient`
/// serves any number of concurrent calls.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    retry: RetryPolicy,
    debug: bool,
    verbose: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Builds a client from configuration.
    ///
    /// With `pooled` disabled no idle connections are kept, so each request
    /// opens a fresh connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &CosmosConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if !config.pooled() {
            builder = builder.pool_max_idle_per_host(0);
        }
        let client = builder.build().map_err(|e| ConfigError::Transport {
            reason: e.to_string(),
        })?;
        Ok(Self::with_transport(client, config))
    }

    /// Wraps an existing transport, e.g. one shared between several clients.
    #[must_use]
    pub fn with_transport(client: reqwest::Client, config: &CosmosConfig) -> Self {
        Self {
            client,
            retry: *config.retry(),
            debug: config.debug(),
            verbose: config.verbose(),
        }
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub(crate) fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Sends `request` until it succeeds, fails permanently, runs out of
    /// attempts or its context ends.
    ///
    /// # Errors
    ///
    /// - [`CosmosError::Context`] if the attached context ends
    /// - [`CosmosError::Request`] for a non-retryable unexpected status
    /// - [`CosmosError::MaxRetries`] when every attempt failed transiently
    /// - [`CosmosError::Transport`] if the request cannot be built
    pub async fn execute(
        &self,
        request: &ResourceRequest,
        expected: ExpectedStatus,
    ) -> Result<RawResponse, CosmosError> {
        let max_attempts = self.retry.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            if let Some(err) = request.context.as_ref().and_then(|ctx| ctx.err()) {
                return Err(err.into());
            }
            attempt += 1;

            if self.debug {
                tracing::debug!(
                    resource_id = request.link.id(),
                    resource_type = request.link.resource_type(),
                    attempt,
                    "{}",
                    request.to_curl(self.verbose)
                );
            }

            let outcome = match &request.context {
                Some(ctx) => tokio::select! {
                    biased;
                    err = ctx.done() => return Err(err.into()),
                    outcome = self.attempt(request, expected) => outcome,
                },
                None => self.attempt(request, expected).await,
            };

            let (status, message) = match outcome {
                Ok(raw) => return Ok(raw),
                Err(Failure::Fatal(err)) => return Err(err),
                Err(Failure::Retryable { status, message }) => (status, message),
            };

            if attempt >= max_attempts {
                return Err(MaxRetriesExceededError {
                    attempts: attempt,
                    last_status: status,
                    message,
                    resource_id: request.link.id().to_string(),
                    resource_type: request.link.resource_type().to_string(),
                }
                .into());
            }

            let wait = self.retry.backoff(attempt - 1);
            tracing::warn!(
                method = request.method.as_str(),
                url = request.url.as_str(),
                attempt,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "retrying request: {message}"
            );
            self.sleep(request, wait).await?;
        }
    }

    async fn sleep(
        &self,
        request: &ResourceRequest,
        wait: std::time::Duration,
    ) -> Result<(), ContextError> {
        match &request.context {
            Some(ctx) => tokio::select! {
                biased;
                err = ctx.done() => Err(err),
                () = tokio::time::sleep(wait) => Ok(()),
            },
            None => {
                tokio::time::sleep(wait).await;
                Ok(())
            }
        }
    }

    async fn attempt(
        &self,
        request: &ResourceRequest,
        expected: ExpectedStatus,
    ) -> Result<RawResponse, Failure> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let exchange = async {
            let res = builder.send().await?;
            let status = res.status().as_u16();
            let headers = res.headers().clone();
            let body = res.bytes().await?;
            Ok::<_, reqwest::Error>((status, headers, body.to_vec()))
        };

        let (status, headers, body) = match exchange.await {
            Ok(parts) => parts,
            Err(e) if e.is_builder() => {
                return Err(Failure::Fatal(
                    TransportError {
                        resource_id: request.link.id().to_string(),
                        resource_type: request.link.resource_type().to_string(),
                        method: request.method.as_str().to_string(),
                        url: request.url.clone(),
                        source: e,
                    }
                    .into(),
                ));
            }
            Err(e) => {
                return Err(Failure::Retryable {
                    status: None,
                    message: format!(
                        "{} {} (resource id '{}', type '{}'): {e}",
                        request.method,
                        request.url,
                        request.link.id(),
                        request.link.resource_type()
                    ),
                });
            }
        };

        if self.verbose {
            tracing::debug!(status, headers = ?headers, body_len = body.len(), "received response");
        }

        if expected.matches(status) {
            return Ok(RawResponse {
                response: Response::new(status, headers),
                body,
            });
        }

        if RetryPolicy::is_retryable_status(status) {
            return Err(Failure::Retryable {
                status: Some(status),
                message: format!("{} {} returned status {status}", request.method, request.url),
            });
        }

        Err(Failure::Fatal(
            Self::request_error(request, status, &body).into(),
        ))
    }

    fn request_error(
        request: &ResourceRequest,
        status: u16,
        body: &[u8],
    ) -> RequestError {
        let service_error = serde_json::from_slice::<ServiceError>(body).unwrap_or_else(|_| {
            ServiceError {
                code: String::new(),
                message: String::from_utf8_lossy(body).into_owned(),
            }
        });
        RequestError {
            code: service_error.code,
            message: service_error.message,
            status_code: status,
            resource_id: request.link.id().to_string(),
            resource_type: request.link.resource_type().to_string(),
            method: request.method.as_str().to_string(),
            url: request.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::HttpMethod;

    fn request() -> ResourceRequest {
        ResourceRequest::new(HttpMethod::Get, "https://localhost:8081", "dbs/mydb")
    }

    #[test]
    fn test_request_error_decodes_service_body() {
        let body = br#"{"code":"NotFound","message":"Resource Not Found"}"#;
        let error = HttpClient::request_error(&request(), 404, body);
        assert_eq!(error.code, "NotFound");
        assert_eq!(error.message, "Resource Not Found");
        assert_eq!(error.status_code, 404);
        assert_eq!(error.resource_id, "mydb");
        assert_eq!(error.resource_type, "dbs");
        assert_eq!(error.method, "GET");
    }

    #[test]
    fn test_request_error_keeps_non_json_body() {
        let error = HttpClient::request_error(&request(), 400, b"bad request");
        assert_eq!(error.code, "");
        assert_eq!(error.message, "bad request");
    }
}
