//! Response bodies and the error type returned by every API call.

use serde::Deserialize;
use serde_json::Value;

/// A response body decoded as far as its content type allows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    /// The body was empty JSON, malformed JSON, or could not be read.
    Null,
}

impl ResponseBody {
    /// Decode `text` according to `content_type`.
    ///
    /// Never fails: unparseable JSON becomes [ResponseBody::Null] instead of a
    /// second error on top of the one being reported.
    pub fn decode(content_type: Option<&str>, text: Option<String>) -> Self {
        let Some(text) = text else {
            return ResponseBody::Null;
        };

        let is_json = content_type
            .map(|value| value.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false);

        if !is_json {
            return ResponseBody::Text(text);
        }

        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Null,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
            ResponseBody::Null => Value::Null,
        }
    }

    /// The non-empty `message` field of a JSON object body.
    pub fn message(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(value) => value
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty()),
            _ => None,
        }
    }
}

/// One rejected input field, as reported by the server's validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// The structured shape of an error body: `{message?, errors?: [...]}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub errors: Option<Vec<FieldError>>,
}

/// The errors that may occur while talking to the API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status outside `200..=299`.
    #[error("{message}")]
    Api {
        status: u16,
        body: ResponseBody,
        message: String,
    },

    /// The request never got a response, e.g. the server is unreachable.
    #[error("network error: {0}")]
    Network(String),

    /// The request payload could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(String),

    /// A successful response did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the error for an unsuccessful response.
    ///
    /// The message prefers the body's `message` field, then a non-blank text
    /// body, then `HTTP {status}`.
    pub fn api(status: u16, body: ResponseBody) -> Self {
        let message = match &body {
            ResponseBody::Text(text) if !text.trim().is_empty() => text.clone(),
            other => other
                .message()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("HTTP {status}")),
        };

        ApiError::Api {
            status,
            body,
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The structured error body, if the server sent a JSON object.
    ///
    /// Each part is read on its own: a non-string `message` is ignored and
    /// malformed entries in `errors` are skipped.
    pub fn error_body(&self) -> Option<ErrorBody> {
        let ApiError::Api {
            body: ResponseBody::Json(Value::Object(fields)),
            ..
        } = self
        else {
            return None;
        };

        let message = fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let errors = fields.get("errors").and_then(Value::as_array).map(|entries| {
            entries
                .iter()
                .filter_map(|entry| FieldError::deserialize(entry).ok())
                .collect()
        });

        Some(ErrorBody { message, errors })
    }
}
