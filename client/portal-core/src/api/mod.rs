use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::PortalConfig;
use crate::error::{ApiError, ApiResult, FieldErrors};

pub mod auth;
pub mod notifications;
pub mod quiz;
pub mod resources;

pub use resources::Resource;

/// Cookie the backend issues alongside the session cookie.
const CSRF_COOKIE_NAME: &str = "csrftoken";
/// Header the backend expects the cookie echoed in on mutating verbs.
const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// JSON-over-HTTPS client for the portal backend.
///
/// Holds the shared cookie jar (session cookie + csrftoken) and echoes the
/// CSRF cookie as `X-CSRFToken` on POST/PUT/PATCH/DELETE only. No request is
/// retried automatically; a slow request simply delays the corresponding
/// update.
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(config: &PortalConfig) -> ApiResult<Self> {
        Self::with_base_url(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .build()?;
        let base = Url::parse(base_url)?;
        Ok(Self { http, base, jar })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Current value of the csrftoken cookie, if the backend has issued one.
    fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base)?;
        let cookies = header.to_str().ok()?;
        cookies.split(';').find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(CSRF_COOKIE_NAME), Some(value)) => Some(value.to_string()),
                _ => None,
            }
        })
    }

    fn is_mutating(method: &Method) -> bool {
        matches!(
            *method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        )
    }

    fn builder(&self, method: Method, path: &str) -> ApiResult<reqwest::RequestBuilder> {
        let url = self.base.join(path)?;
        let mut req = self.http.request(method.clone(), url);
        if Self::is_mutating(&method) {
            if let Some(token) = self.csrf_token() {
                req = req.header(CSRF_HEADER_NAME, token);
            }
        }
        Ok(req)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.builder(Method::GET, path)?.send().await?;
        Self::decode_response(resp).await
    }

    pub(crate) async fn get_json_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self.builder(Method::GET, path)?.query(query).send().await?;
        Self::decode_response(resp).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.builder(Method::POST, path)?.json(body).send().await?;
        Self::decode_response(resp).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self.builder(Method::POST, path)?.send().await?;
        Self::decode_response(resp).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.builder(Method::PUT, path)?.json(body).send().await?;
        Self::decode_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        let resp = self.builder(Method::DELETE, path)?.send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(status, resp.text().await?))
        }
    }

    async fn decode_response<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            serde_json::from_str(&body).map_err(ApiError::Decode)
        } else {
            Err(Self::error_from(status, body))
        }
    }

    /// Maps an error body to the taxonomy: a `detail` message stays a status
    /// error; a 400 with per-field messages becomes a validation error
    /// surfaced verbatim near the relevant form field.
    fn error_from(status: StatusCode, body: String) -> ApiError {
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(&body) {
            if let Some(detail) = map.get("detail").and_then(|v| v.as_str()) {
                return ApiError::Status {
                    status: status.as_u16(),
                    message: detail.to_string(),
                };
            }
            if status == StatusCode::BAD_REQUEST {
                let mut fields = FieldErrors::new();
                for (field, value) in &map {
                    match value {
                        serde_json::Value::String(msg) => {
                            fields.insert(field.clone(), vec![msg.clone()]);
                        }
                        serde_json::Value::Array(items) => {
                            let messages: Vec<String> = items
                                .iter()
                                .filter_map(|i| i.as_str().map(str::to_string))
                                .collect();
                            if !messages.is_empty() {
                                fields.insert(field.clone(), messages);
                            }
                        }
                        _ => {}
                    }
                }
                if !fields.is_empty() {
                    return ApiError::Validation(fields);
                }
            }
        }

        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.chars().take(200).collect()
        };
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

/// In-flight flag making a dialog's Save non-reentrant: a second submit
/// while the first request is still awaited is rejected locally instead of
/// racing it.
#[derive(Debug, Default)]
pub struct MutationGuard {
    in_flight: AtomicBool,
}

impl MutationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard; `None` while a prior mutation is still in flight.
    /// The permit releases on drop.
    pub fn begin(&self) -> Option<MutationPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| MutationPermit { guard: self })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

pub struct MutationPermit<'a> {
    guard: &'a MutationGuard,
}

impl Drop for MutationPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}
