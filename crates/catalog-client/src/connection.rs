//! Authenticated HTTP session with retry logic.
//!
//! [`Transport`] is the seam between the access layer and the wire: it
//! fetches JSON documents, PUTs JSON bodies and encodes object IDs.
//! [`CatalogConnection`] is the production implementation.

use crate::config::ClientConfig;
use crate::encoding;
use crate::error::{is_transient_status, is_transient_transport, ClientError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{
    policies::ExponentialBackoff, RetryTransientMiddleware, Retryable, RetryableStrategy,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Session-level operations the access layer builds on.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Base URL of the catalog service, without a trailing slash.
    fn base_url(&self) -> &str;

    /// Whether diagnostics should be reported verbosely.
    fn verbose(&self) -> bool {
        false
    }

    /// GET `url` and decode the body as JSON.
    async fn get_json(&self, url: &str) -> Result<Value>;

    /// PUT `body` as JSON to `url`.
    async fn put_json(&self, url: &str, body: &Value) -> Result<()>;

    /// Encode an object ID for use in a URL path.
    fn encode_id(&self, id: &str, tilde: bool) -> String {
        encoding::encode_id(id, tilde)
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn base_url(&self) -> &str {
        (**self).base_url()
    }

    fn verbose(&self) -> bool {
        (**self).verbose()
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        (**self).get_json(url).await
    }

    async fn put_json(&self, url: &str, body: &Value) -> Result<()> {
        (**self).put_json(url, body).await
    }

    fn encode_id(&self, id: &str, tilde: bool) -> String {
        (**self).encode_id(id, tilde)
    }
}

/// HTTP session against a catalog service.
pub struct CatalogConnection {
    http: ClientWithMiddleware,
    config: ClientConfig,
    principal: Option<String>,
}

impl CatalogConnection {
    /// Open a session with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("edc-catalog-client")),
        );

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.tls_verify)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(config.retry_initial_delay, config.retry_max_delay)
            .build_with_max_retries(config.max_retries);

        let http = ClientBuilder::new(reqwest_client)
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                retry_policy,
                CatalogRetryStrategy,
            ))
            .build();

        let principal = config.principal();

        Ok(Self {
            http,
            config,
            principal,
        })
    }

    /// The configuration this session was opened with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and return the raw success body.
    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Vec<u8>> {
        let start = Instant::now();

        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut request = self.http.request(method.clone(), url);
        if let Some(principal) = &self.principal {
            request = request.basic_auth(principal, self.config.password.as_deref());
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let duration = start.elapsed();

        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        tracing::debug!(
            method = %method,
            url = %url,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            request_id = ?request_id,
            "Received response"
        );

        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        let retry_after = parse_retry_after(response.headers());
        let error_body = response.bytes().await.ok();
        let parsed: Option<Value> = error_body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok());

        let message = parsed
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| {
                error_body
                    .as_deref()
                    .map(|b| String::from_utf8_lossy(b).to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| status.to_string())
            });

        let request_id = parsed
            .as_ref()
            .and_then(|v| v.get("request_id").and_then(Value::as_str))
            .map(String::from)
            .or(request_id);

        tracing::warn!(
            method = %method,
            url = %url,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            request_id = ?request_id,
            error = %message,
            "Request failed"
        );

        let error = status_to_error(status, message, request_id, retry_after);
        if error.is_transient() {
            tracing::warn!(url = %url, "Retries exhausted");
        }
        Err(error)
    }
}

#[async_trait]
impl Transport for CatalogConnection {
    fn base_url(&self) -> &str {
        self.config.base_url()
    }

    fn verbose(&self) -> bool {
        self.config.verbose
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let body = self.send(Method::GET, url, None).await?;
        serde_json::from_slice(&body).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "Failed to parse response: {} (body: {})",
                e,
                String::from_utf8_lossy(&body)
            ))
        })
    }

    async fn put_json(&self, url: &str, body: &Value) -> Result<()> {
        self.send(Method::PUT, url, Some(body)).await?;
        Ok(())
    }
}

/// Pull a human-readable message out of a JSON error body.
fn error_message(value: &Value) -> Option<String> {
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(String::from)
}

/// Convert HTTP status to appropriate error type.
fn status_to_error(
    status: StatusCode,
    message: String,
    request_id: Option<String>,
    retry_after: Option<Duration>,
) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited {
            retry_after,
            request_id,
        },
        _ => ClientError::ServerError {
            status: status.as_u16(),
            message,
            request_id,
        },
    }
}

/// Parse the Retry-After header value into a Duration.
///
/// Accepts delay-seconds and HTTP-date forms (RFC 7231).
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let header_value = headers.get("retry-after")?.to_str().ok()?;

    if let Ok(seconds) = header_value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    if let Ok(date) = httpdate::parse_http_date(header_value) {
        // Dates in the past mean "retry now".
        return Some(
            date.duration_since(std::time::SystemTime::now())
                .unwrap_or(Duration::ZERO),
        );
    }

    None
}

/// Retry policy for catalog requests.
///
/// Retries transient network errors, 5xx and 429. Other 4xx are fatal.
/// Object PUTs replace the whole object, so repeating one is safe.
struct CatalogRetryStrategy;

impl RetryableStrategy for CatalogRetryStrategy {
    fn handle(&self, res: &reqwest_middleware::Result<reqwest::Response>) -> Option<Retryable> {
        match res {
            Ok(response) if response.status().is_success() => None,
            Ok(response) if is_transient_status(response.status()) => Some(Retryable::Transient),
            Ok(_) => Some(Retryable::Fatal),
            Err(error) if is_transient_transport(error) => Some(Retryable::Transient),
            Err(_) => Some(Retryable::Fatal),
        }
    }
}
