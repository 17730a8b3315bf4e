//! # quill
//!
//! A small blog post API held entirely in memory, served over HTTP.
//!
//! Five routes over one ordered collection: list, fetch by id, create,
//! partially update, delete. No database, no auth, no pagination. The
//! collection starts with three seed posts and everything is gone when the
//! process exits.
//!
//! Underneath sits a thin HTTP layer: radix-tree routing via [`matchit`],
//! hyper for the wire, and graceful shutdown on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quill::{api, PostStore, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quill::Error> {
//!     let app = api::router(Arc::new(PostStore::seeded()));
//!     Server::bind("127.0.0.1:4000".parse().unwrap())
//!         .await?
//!         .serve(app)
//!         .await
//! }
//! ```

mod error;
mod handler;
mod method;
mod post;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;

pub mod api;
pub mod config;
pub mod telemetry;

pub use config::Config;
pub use error::{BodyError, Error, PostError};
pub use handler::Handler;
pub use method::Method;
pub use post::{Post, PostId, PostInput};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::PostStore;
