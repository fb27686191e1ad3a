//! HTTP plumbing shared by every endpoint group
//!
//! Wraps `reqwest::Client` with a cookie store so the session cookie that
//! `/api/me` relies on travels with every request. Requests are sent once;
//! there is no retry and, unless configured, no timeout.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

const JSON_MIME_TYPE: &str = "application/json";

/// Typed client for the HR REST surface
#[derive(Clone, Debug)]
pub struct HrClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HrClient {
    /// Build a client for `config`
    ///
    /// # Errors
    /// Returns an error if the base URL is not http(s) or the TLS backend
    /// cannot be initialised
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = config.normalized_base();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(concat!("hrdesk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: builder.build()?,
            base_url: base.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, %url, "HR request");
        self.inner
            .request(method, url)
            .header(reqwest::header::ACCEPT, JSON_MIME_TYPE)
    }

    /// Like [`HrClient::request`], with `segment` appended as one encoded path segment
    pub(crate) fn request_with_segment(
        &self,
        method: Method,
        path: &str,
        segment: &str,
    ) -> Result<RequestBuilder> {
        let raw = self.url(path);
        let mut url = reqwest::Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(raw.clone()))?
            .push(segment.trim());
        debug!(%method, %url, "HR request");
        Ok(self
            .inner
            .request(method, url)
            .header(reqwest::header::ACCEPT, JSON_MIME_TYPE))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        decode(response).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        decode(response).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::DELETE, path).send().await?;
        decode(response).await
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        decode(builder.send().await?).await
    }
}

/// Turn a response into `T`, mapping every error shape the server uses
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let value = read_value(response).await?;
    Ok(serde_json::from_value(value)?)
}

/// Read the body as JSON, failing on non-2xx or an embedded error
pub(crate) async fn read_value(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response.text().await?;
    debug!(%status, body_len = body.len(), "HR response received");

    // Some mutation endpoints answer with an empty body.
    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => return Err(ApiError::Decode(e)),
            Err(_) => Value::Null,
        }
    };

    if !status.is_success() {
        let message = embedded_error(&value).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    if let Some(message) = embedded_error(&value) {
        return Err(ApiError::Server(message));
    }
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request was not successful")
            .to_string();
        return Err(ApiError::Server(message));
    }

    Ok(value)
}

fn embedded_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
