//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::error::BodyError;

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

/// Body encodings [`Request::form_or_json`] understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl Request {
    pub(crate) fn new(
        path: String,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { path, headers, body, params }
    }

    /// The matched path, without any trailing slash.
    pub fn path(&self) -> &str { &self.path }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/posts/{id}`, `req.param("id")` on `/posts/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Deserialises a JSON or `application/x-www-form-urlencoded` body into
    /// a struct of named fields.
    ///
    /// - An empty body, or any other content type, yields `T::default()`.
    /// - A JSON array has no named fields, so it also yields `T::default()`.
    /// - Any other JSON value that is not an object is rejected.
    pub fn form_or_json<T: DeserializeOwned + Default>(&self) -> Result<T, BodyError> {
        if self.body.is_empty() {
            return Ok(T::default());
        }
        match self.kind() {
            BodyKind::Json => match serde_json::from_slice::<Value>(&self.body)? {
                Value::Object(map) => Ok(T::deserialize(Value::Object(map))?),
                Value::Array(_) => Ok(T::default()),
                other => Err(BodyError::Json(serde_json::Error::custom(format!(
                    "expected an object or array, found `{other}`"
                )))),
            },
            BodyKind::Form => Ok(serde_urlencoded::from_bytes(&self.body)?),
            BodyKind::Other => Ok(T::default()),
        }
    }

    fn kind(&self) -> BodyKind {
        let essence = self.header("content-type")
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
            .unwrap_or_default();
        if essence.eq_ignore_ascii_case("application/json") {
            BodyKind::Json
        } else if essence.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            BodyKind::Form
        } else {
            BodyKind::Other
        }
    }
}
