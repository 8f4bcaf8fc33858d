// crates/favorites-client/src/client.rs
// ============================================================================
// Module: Favorites HTTP Client
// Description: Session-aware HTTP client for the favorites API.
// Purpose: Issue auth and favorites requests and capture transcripts.
// Dependencies: favorites-contract, reqwest, serde, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! A [`FavoritesClient`] owns a `reqwest` client with a private cookie jar.
//! [`FavoritesClient::login`] obtains the session cookie from
//! `POST /v1/auth/tokens`; later calls send it automatically. Requests are
//! single-shot: transport failures surface as [`ClientError`] and HTTP error
//! statuses are returned to the caller as ordinary [`ApiResponse`] values.
//!
//! Security posture: responses are untrusted and capped at
//! [`MAX_RESPONSE_BYTES`]; cookie values are never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use favorites_contract::ApiStatus;
use favorites_contract::FavoriteForm;
use favorites_contract::FavoritePlace;
use favorites_contract::RequestMethod;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use reqwest::cookie::CookieStore;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tracing::warn;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum response body size accepted from the server.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Session endpoint, relative to the base URL.
pub const AUTH_TOKENS_PATH: &str = "v1/auth/tokens";
/// Favorites endpoint, relative to the base URL.
pub const FAVORITES_PATH: &str = "v1/favorites";
/// Placeholder recorded in place of session-bearing values.
pub const REDACTED: &str = "<redacted>";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Favorites client errors.
///
/// # Invariants
/// - String payloads may include untrusted server text.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("favorites client config error: {0}")]
    Config(String),
    /// Transport error.
    #[error("favorites transport error: {0}")]
    Transport(String),
    /// JSON decoding error.
    #[error("favorites json error: {0}")]
    Json(String),
    /// The server answered with a status the operation cannot continue from.
    #[error("unexpected http status {status} from {path}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Endpoint path that produced it.
        path: String,
    },
    /// Response size exceeds limits.
    #[error("favorites response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Actual size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Client configuration.
///
/// # Invariants
/// - `base_url` is an absolute `http` or `https` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the deployment; endpoints are resolved beneath it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the URL is not an `http(s)` base.
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base url must use http or https, got {}",
                base_url.scheme()
            )));
        }
        if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
            return Err(ClientError::Config(format!("base url has no host: {base_url}")));
        }
        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Parses and validates a base URL string.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the string is not a valid base URL.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let url = Url::parse(raw.trim())
            .map_err(|err| ClientError::Config(format!("invalid base url {raw}: {err}")))?;
        Self::new(url)
    }

    /// Replaces the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves an endpoint path beneath the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let mut base = self.base_url.clone();
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|err| ClientError::Config(format!("invalid endpoint {path}: {err}")))
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// HTTP response from the favorites API.
///
/// # Invariants
/// - `body` is `Value::Null` for an empty body and a JSON string for a body
///   that is not valid JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Decoded body.
    pub body: Value,
}

impl ApiResponse {
    /// Builds a response from a status and raw body bytes.
    #[must_use]
    pub fn from_parts(status: StatusCode, bytes: &[u8]) -> Self {
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
        };
        Self {
            status,
            body,
        }
    }

    /// Returns the contract status, if the code is one the contract names.
    #[must_use]
    pub fn api_status(&self) -> Option<ApiStatus> {
        ApiStatus::from_code(self.status.as_u16())
    }

    /// Returns `error.message` from the body, when present.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error")?.get("message")?.as_str()
    }

    /// Returns true when the body is an object containing `name`.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.body.as_object().is_some_and(|object| object.contains_key(name))
    }

    /// Decodes the body as a created place.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Json`] when the body does not match the resource shape.
    pub fn place(&self) -> Result<FavoritePlace, ClientError> {
        FavoritePlace::deserialize(&self.body)
            .map_err(|err| ClientError::Json(format!("invalid favorite place payload: {err}")))
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    /// Status returned by the auth endpoint.
    pub status: u16,
    /// Whether the jar now holds a cookie for the favorites endpoint.
    pub cookie_set: bool,
}

/// One recorded request/response exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position in the transcript.
    pub sequence: u64,
    /// HTTP verb.
    pub method: String,
    /// Endpoint path relative to the base URL.
    pub path: String,
    /// Form body that was sent, or `null`.
    pub request: Value,
    /// HTTP status, when a response arrived.
    pub status: Option<u16>,
    /// Decoded response body, or `null`.
    pub response: Value,
    /// Client error, when the exchange failed.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Favorites API client bound to a single cookie session.
#[derive(Clone)]
pub struct FavoritesClient {
    /// Client configuration.
    config: ClientConfig,
    /// Underlying HTTP client.
    http: Client,
    /// Cookie jar shared with `http`.
    jar: Arc<Jar>,
    /// Recorded exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl fmt::Debug for FavoritesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("timeout", &self.config.timeout)
            .field("session", &self.has_session().then_some(REDACTED))
            .finish_non_exhaustive()
    }
}

impl FavoritesClient {
    /// Creates a client with an empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .timeout(config.timeout)
            .cookie_provider(Arc::clone(&jar))
            .redirect(Policy::none())
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            config,
            http,
            jar,
            transcript: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns true when the jar holds a cookie the favorites endpoint will receive.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.config
            .endpoint(FAVORITES_PATH)
            .ok()
            .and_then(|url| self.jar.cookies(&url))
            .is_some()
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Requests a session cookie from `POST /v1/auth/tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] for a non-success status, or a
    /// transport error when the request fails.
    pub async fn login(&self) -> Result<SessionInfo, ClientError> {
        let response = self.send(RequestMethod::Post, AUTH_TOKENS_PATH, None).await?;
        if !response.status.is_success() {
            return Err(ClientError::Status {
                status: response.status.as_u16(),
                path: AUTH_TOKENS_PATH.to_string(),
            });
        }
        let info = SessionInfo {
            status: response.status.as_u16(),
            cookie_set: self.has_session(),
        };
        debug!(cookie_set = info.cookie_set, "favorites session requested");
        Ok(info)
    }

    /// Submits `form` to `POST /v1/favorites`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an oversized body.
    pub async fn create_favorite(&self, form: &FavoriteForm) -> Result<ApiResponse, ClientError> {
        self.send(RequestMethod::Post, FAVORITES_PATH, Some(form)).await
    }

    /// Sends `GET /v1/favorites` with `form` as the body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an oversized body.
    pub async fn get_favorites(&self, form: &FavoriteForm) -> Result<ApiResponse, ClientError> {
        self.send(RequestMethod::Get, FAVORITES_PATH, Some(form)).await
    }

    /// Sends `form` to the favorites endpoint with an arbitrary verb.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an oversized body.
    pub async fn send_favorites(
        &self,
        method: RequestMethod,
        form: &FavoriteForm,
    ) -> Result<ApiResponse, ClientError> {
        self.send(method, FAVORITES_PATH, Some(form)).await
    }

    /// Sends one request and records it in the transcript.
    async fn send(
        &self,
        method: RequestMethod,
        path: &str,
        form: Option<&FavoriteForm>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.config.endpoint(path)?;
        let mut request = match method {
            RequestMethod::Get => self.http.get(url),
            RequestMethod::Post => self.http.post(url),
        };
        if let Some(form) = form {
            request = request.form(&form.pairs());
        }
        let result = execute(request).await;
        let request_value =
            form.and_then(|form| serde_json::to_value(form).ok()).unwrap_or(Value::Null);
        match &result {
            Ok(response) => {
                debug!(
                    method = method.as_str(),
                    path,
                    status = response.status.as_u16(),
                    "favorites exchange completed"
                );
                self.record_transcript(
                    method,
                    path,
                    request_value,
                    Some(response.status.as_u16()),
                    transcript_body(path, &response.body),
                    None,
                );
            }
            Err(err) => {
                warn!(method = method.as_str(), path, error = %err, "favorites exchange failed");
                self.record_transcript(
                    method,
                    path,
                    request_value,
                    None,
                    Value::Null,
                    Some(err.to_string()),
                );
            }
        }
        result
    }

    /// Appends an entry to the transcript.
    fn record_transcript(
        &self,
        method: RequestMethod,
        path: &str,
        request: Value,
        status: Option<u16>,
        response: Value,
        error: Option<String>,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: method.as_str().to_string(),
            path: path.to_string(),
            request,
            status,
            response,
            error,
        });
    }
}

/// Returns the response body as it may appear in a transcript.
///
/// Auth responses can carry the session token, so their bodies are redacted.
fn transcript_body(path: &str, body: &Value) -> Value {
    if path == AUTH_TOKENS_PATH && !body.is_null() {
        Value::String(REDACTED.to_string())
    } else {
        body.clone()
    }
}

/// Sends a prepared request and reads a size-capped body.
async fn execute(request: RequestBuilder) -> Result<ApiResponse, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|err| ClientError::Transport(format!("http request failed: {err}")))?;
    let status = response.status();
    if let Some(declared) = response.content_length() {
        let declared = usize::try_from(declared).unwrap_or(usize::MAX);
        if declared > MAX_RESPONSE_BYTES {
            return Err(ClientError::ResponseTooLarge {
                actual: declared,
                limit: MAX_RESPONSE_BYTES,
            });
        }
    }
    let bytes = read_body_with_limit(response, MAX_RESPONSE_BYTES).await?;
    Ok(ApiResponse::from_parts(status, &bytes))
}

/// Reads a response body chunk by chunk, failing as soon as `limit` is exceeded.
async fn read_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ClientError> {
    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|err| ClientError::Transport(format!("failed to read response body: {err}")))?
    {
        let total = body.len().checked_add(chunk.len()).ok_or(ClientError::ResponseTooLarge {
            actual: usize::MAX,
            limit,
        })?;
        if total > limit {
            return Err(ClientError::ResponseTooLarge {
                actual: total,
                limit,
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
