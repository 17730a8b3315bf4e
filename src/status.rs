//! HTTP status codes as a typed enum.
//!
//! Only the codes the service actually emits. Use [`Status`] anywhere a
//! status is accepted: `Response::status()`, `Response::builder().status()`,
//! or as a bare handler return value.
//!
//! ```rust
//! use quill::{Response, Status};
//!
//! Response::status(Status::NoContent);
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/posts/4")
//!     .json(br#"{"id":4}"#.to_vec());
//! ```

use http::StatusCode;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    Created,             // 201
    NoContent,           // 204
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    InternalServerError, // 500
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> StatusCode {
        match s {
            Status::Ok                  => StatusCode::OK,
            Status::Created             => StatusCode::CREATED,
            Status::NoContent           => StatusCode::NO_CONTENT,
            Status::BadRequest          => StatusCode::BAD_REQUEST,
            Status::NotFound            => StatusCode::NOT_FOUND,
            Status::MethodNotAllowed    => StatusCode::METHOD_NOT_ALLOWED,
            Status::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        StatusCode::from(s).as_u16()
    }
}
