//! The boundary between the API client and the browser's fetch.

use std::fmt;

use gloo_net::http::Request;
use web_sys::RequestCredentials;

use super::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// A fully resolved request, ready to hand to a [Transport].
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RawRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What came back, before any interpretation of the status.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// `None` when the body text could not be read.
    pub body: Option<String>,
}

/// Sends a [RawRequest] and reports the raw outcome.
///
/// Only a failure to get any response at all is an error here; HTTP error
/// statuses are interpreted by the client.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, ApiError>;
}

/// The browser fetch API via `gloo-net`. Cookies are always included so the
/// server session survives across calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .credentials(RequestCredentials::Include);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let sent = match request.body {
            Some(body) => {
                builder
                    .body(body)
                    .map_err(|error| ApiError::Encode(error.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|error| ApiError::Network(error.to_string()))?;

        let content_type = response.headers().get("content-type");
        let body = response.text().await.ok();

        Ok(RawResponse {
            status: response.status(),
            content_type,
            body,
        })
    }
}
