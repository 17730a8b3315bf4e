//! Error types.
//!
//! Two families live here. [`Error`] covers infrastructure: binding a port,
//! parsing a listen address. [`PostError`] covers everything a client can
//! cause, and every variant renders to a status code plus a `{"message"}`
//! body through [`IntoResponse`](crate::IntoResponse).

use thiserror::Error;

use crate::post::PostId;
use crate::status::Status;

/// The error type returned by quill's fallible server operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// A request body that could not be decoded.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),
}

/// A request-level failure of the post service.
///
/// The `Display` text is exactly the `message` sent to the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostError {
    #[error("No posts found")]
    NoPosts,

    /// Lookup miss on `GET /posts/{id}`.
    #[error("No post found that match with the ID({0})")]
    NoMatch(PostId),

    /// Lookup miss on `PATCH` and `DELETE`.
    #[error("Post not found.")]
    NotFound,

    #[error("Missing the following fields: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("No fields provided for update.")]
    NoFieldsProvided,

    /// The body could not be decoded; carries the [`BodyError`] text.
    #[error("{0}")]
    InvalidBody(String),
}

impl PostError {
    /// The HTTP status this failure is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::NoPosts | Self::NoMatch(_) | Self::NotFound => Status::NotFound,
            Self::Missing(_) | Self::NoFieldsProvided | Self::InvalidBody(_) => Status::BadRequest,
        }
    }
}

impl From<BodyError> for PostError {
    fn from(e: BodyError) -> Self {
        Self::InvalidBody(e.to_string())
    }
}
