//! A thin typed client for the finance REST API.
//!
//! Every call goes through [ApiClient::send], which attaches the request body,
//! decodes whatever came back and turns unsuccessful statuses into
//! [ApiError::Api].

mod endpoints;
mod error;
#[cfg(test)]
pub(crate) mod test_utils;
mod transport;

use serde::{de::DeserializeOwned, Serialize};

use crate::config;

pub use error::{ApiError, ErrorBody, FieldError, ResponseBody};
pub use transport::{FetchTransport, Method, RawRequest, RawResponse, Transport};

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The body of an [ApiRequest]. A request has at most one.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(String),
    /// A body that is already encoded, e.g. a url-encoded login form.
    Raw {
        content_type: &'static str,
        body: String,
    },
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    payload: Payload,
    headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: Payload::Empty,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Send `body` as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let encoded =
            serde_json::to_string(body).map_err(|error| ApiError::Encode(error.to_string()))?;
        self.payload = Payload::Json(encoded);
        Ok(self)
    }

    /// Send `body` url-encoded, as an HTML form would.
    pub fn form<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ApiError> {
        let encoded =
            serde_urlencoded::to_string(body).map_err(|error| ApiError::Encode(error.to_string()))?;
        Ok(self.raw(FORM_CONTENT_TYPE, encoded))
    }

    pub fn raw(mut self, content_type: &'static str, body: impl Into<String>) -> Self {
        self.payload = Payload::Raw {
            content_type,
            body: body.into(),
        };
        self
    }

    /// Add a header. Explicit headers win over the payload's content type.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn into_raw(self, base_url: &str) -> RawRequest {
        let (content_type, body) = match self.payload {
            Payload::Empty => (None, None),
            Payload::Json(body) => (Some(JSON_CONTENT_TYPE), Some(body)),
            Payload::Raw { content_type, body } => (Some(content_type), Some(body)),
        };

        let mut headers = Vec::with_capacity(self.headers.len() + 1);
        if let Some(content_type) = content_type {
            let overridden = self
                .headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
            if !overridden {
                headers.push(("Content-Type".to_owned(), content_type.to_owned()));
            }
        }
        headers.extend(self.headers);

        RawRequest {
            method: self.method,
            url: format!("{base_url}{}", self.path),
            headers,
            body,
        }
    }
}

/// Talks to the API at `base_url` through a [Transport].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient<T = FetchTransport> {
    base_url: String,
    transport: T,
}

impl Default for ApiClient<FetchTransport> {
    fn default() -> Self {
        Self::new(config::API_BASE_URL, FetchTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// Send `request` and return the decoded body of a successful response.
    ///
    /// # Errors
    ///
    /// [ApiError::Network] if no response arrived, [ApiError::Api] carrying the
    /// status and decoded body for any status outside `200..=299`.
    pub async fn send(&self, request: ApiRequest) -> Result<ResponseBody, ApiError> {
        let request = request.into_raw(&self.base_url);
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!("{method} {url}");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!("{method} {url} failed: {error}");
                return Err(error);
            }
        };

        let body = ResponseBody::decode(response.content_type.as_deref(), response.body);

        if !(200..300).contains(&response.status) {
            let error = ApiError::api(response.status, body);
            tracing::warn!("{method} {url} returned {}: {error}", response.status);
            return Err(error);
        }

        tracing::debug!("{method} {url} returned {}", response.status);
        Ok(body)
    }

    /// Like [ApiClient::send], then deserialize the body into `R`.
    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let body = self.send(request).await?;

        serde_json::from_value(body.into_value()).map_err(|error| ApiError::Decode(error.to_string()))
    }
}
