//! HTTP transport for the REST backend.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use chirp_core::{
    ApiError, ApiUrl, AuthError, InvalidInputError, NetworkError, Result, ServerError, TokenStore,
};

use crate::config::ClientConfig;

/// Message used when an error body carries nothing readable.
pub const FALLBACK_ERROR_MESSAGE: &str = "request failed";

enum Body {
    Empty,
    Json(Vec<u8>),
    Multipart(Form),
}

/// Method, body and headers for one request.
pub struct RequestOptions {
    method: Method,
    body: Body,
    headers: HeaderMap,
    authenticated: bool,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: Body::Empty,
            headers: HeaderMap::new(),
            authenticated: true,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| InvalidInputError::Request {
            reason: e.to_string(),
        })?;
        self.body = Body::Json(bytes);
        Ok(self)
    }

    /// Send a multipart form body. Any caller-set content type is dropped so
    /// the transport can set the boundary.
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Do not attach the stored credential token.
    pub fn without_auth(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            Body::Empty => "empty",
            Body::Json(_) => "json",
            Body::Multipart(_) => "multipart",
        };
        f.debug_struct("RequestOptions")
            .field("method", &self.method)
            .field("body", &body)
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}

/// HTTP client bound to one backend and one token store.
///
/// Cheap to clone; clones share the connection pool and the token store.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    api: ApiUrl,
    tokens: Arc<dyn TokenStore>,
    timeout: Option<Duration>,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("api", &self.api.as_str())
            .field("timeout", &self.timeout)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

impl RestClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| NetworkError::Http {
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self {
            http,
            api: config.api_url,
            tokens,
            timeout: config.timeout,
        })
    }

    pub fn api_url(&self) -> &ApiUrl {
        &self.api
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Send a request and decode the JSON response.
    ///
    /// A 204 response decodes from JSON `null`, so `()` and `Option<_>`
    /// targets succeed on it.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<R> {
        let response = self.send(endpoint, options).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.error_from(response).await);
        }

        if status == StatusCode::NO_CONTENT {
            return decode(status, Value::Null);
        }

        if !is_json(response.headers()) {
            return Err(ServerError::new(status.as_u16(), "response is not JSON").into());
        }

        let bytes = response.bytes().await.map_err(|e| self.network_error(e))?;
        if bytes.is_empty() {
            return decode(status, Value::Null);
        }
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            ServerError::new(status.as_u16(), format!("malformed JSON response: {e}"))
        })?;
        decode(status, value)
    }

    /// Send a request whose success body, if any, is ignored.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request_empty(&self, endpoint: &str, options: RequestOptions) -> Result<()> {
        let response = self.send(endpoint, options).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from(response).await)
        }
    }

    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R> {
        self.request(endpoint, RequestOptions::get()).await
    }

    pub async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(endpoint, RequestOptions::post().json(body)?).await
    }

    pub async fn patch_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(endpoint, RequestOptions::patch().json(body)?).await
    }

    pub async fn post_empty(&self, endpoint: &str) -> Result<()> {
        self.request_empty(endpoint, RequestOptions::post()).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        self.request_empty(endpoint, RequestOptions::delete()).await
    }

    async fn send(&self, endpoint: &str, options: RequestOptions) -> Result<reqwest::Response> {
        let url = self.api.endpoint(endpoint);
        debug!(%url, "sending request");

        let RequestOptions {
            method,
            body,
            mut headers,
            authenticated,
        } = options;

        if authenticated {
            if let Some(token) = self.tokens.load()? {
                let value = HeaderValue::from_str(&token.header_value()).map_err(|_| {
                    AuthError::TokenRejected {
                        message: Some("stored token contains invalid characters".to_string()),
                    }
                })?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        let mut builder = self.http.request(method, &url);
        builder = match body {
            Body::Empty => builder.headers(headers),
            Body::Json(bytes) => {
                headers
                    .entry(CONTENT_TYPE)
                    .or_insert(HeaderValue::from_static("application/json"));
                builder.headers(headers).body(bytes)
            }
            Body::Multipart(form) => {
                headers.remove(CONTENT_TYPE);
                builder.headers(headers).multipart(form)
            }
        };

        let response = builder.send().await.map_err(|e| self.network_error(e))?;
        trace!(status = %response.status(), "response received");
        Ok(response)
    }

    async fn error_from(&self, response: reqwest::Response) -> chirp_core::Error {
        let status = response.status();
        let code = status.as_u16();

        if !is_json(response.headers()) {
            if status == StatusCode::UNAUTHORIZED {
                return AuthError::TokenRejected { message: None }.into();
            }
            return ServerError::new(code, "response is not JSON").into();
        }

        let message = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<Value>(&bytes)
                .map(|body| extract_error_message(&body))
                .unwrap_or_else(|_| FALLBACK_ERROR_MESSAGE.to_string()),
            Err(e) => return self.network_error(e),
        };
        debug!(status = code, %message, "request rejected");

        if status == StatusCode::UNAUTHORIZED {
            AuthError::TokenRejected {
                message: Some(message),
            }
            .into()
        } else if status.is_server_error() {
            ServerError::new(code, message).into()
        } else {
            ApiError::new(code, message).into()
        }
    }

    fn network_error(&self, e: reqwest::Error) -> chirp_core::Error {
        if e.is_timeout() {
            NetworkError::Timeout {
                duration_ms: self
                    .timeout
                    .map(|t| t.as_millis() as u64)
                    .unwrap_or_default(),
            }
            .into()
        } else if e.is_connect() {
            NetworkError::Connection {
                message: e.to_string(),
            }
            .into()
        } else {
            NetworkError::Http {
                message: e.to_string(),
            }
            .into()
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains("json"))
        .unwrap_or(false)
}

fn decode<R: DeserializeOwned>(status: StatusCode, value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|e| {
        ServerError::new(status.as_u16(), format!("unexpected response shape: {e}")).into()
    })
}

/// Pick the human-readable message out of an error body.
///
/// `detail` wins, then `message`, then every field-level message joined
/// with `", "`. Falls back to [`FALLBACK_ERROR_MESSAGE`].
pub fn extract_error_message(body: &Value) -> String {
    if let Some(detail) = body.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }

    let mut messages = Vec::new();
    collect_messages(body, &mut messages);
    if messages.is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        messages.join(", ")
    }
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) if !s.is_empty() => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|v| collect_messages(v, out)),
        Value::Object(fields) => fields.values().for_each(|v| collect_messages(v, out)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_core::MemoryTokenStore;
    use serde_json::json;

    #[test]
    fn detail_takes_precedence() {
        let body = json!({"detail": "Not found.", "message": "other", "field": ["x"]});
        assert_eq!(extract_error_message(&body), "Not found.");
    }

    #[test]
    fn message_used_without_detail() {
        let body = json!({"message": "Post is too long", "content": ["x"]});
        assert_eq!(extract_error_message(&body), "Post is too long");
    }

    #[test]
    fn field_errors_are_flattened_in_order() {
        let body = json!({
            "username": ["A user with that username already exists."],
            "password": ["This password is too short.", "This password is too common."]
        });
        assert_eq!(
            extract_error_message(&body),
            "A user with that username already exists., This password is too short., This password is too common."
        );
    }

    #[test]
    fn nested_field_errors_are_flattened() {
        let body = json!({"non_field_errors": {"inner": ["deep"]}});
        assert_eq!(extract_error_message(&body), "deep");
    }

    #[test]
    fn empty_body_falls_back() {
        assert_eq!(extract_error_message(&json!({})), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_error_message(&json!(null)), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_error_message(&json!({"detail": 3})), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn debug_does_not_leak_tokens() {
        let store = Arc::new(MemoryTokenStore::with_token(chirp_core::AuthToken::new(
            "secret-token",
        )));
        let config = ClientConfig::new(ApiUrl::new("http://localhost:8000/api").unwrap());
        let client = RestClient::new(config, store).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("localhost:8000"));
    }

    #[test]
    fn json_options_report_body_kind() {
        let options = RequestOptions::post().json(&json!({"a": 1})).unwrap();
        assert_eq!(*options.method(), Method::POST);
        assert!(format!("{options:?}").contains("json"));
    }
}
