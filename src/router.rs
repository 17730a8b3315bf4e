//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler, and every handler receives a clone of the router's state.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

impl Router<()> {
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// A router whose handlers all receive a clone of `state`.
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for the same method. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request with a fully collected body and produces its
    /// response. The server calls this for every request; tests can call it
    /// directly without opening a socket.
    ///
    /// Unknown methods get `405`; unmatched paths get a `404` whose message
    /// names the method and path. `HEAD` falls back to the `GET` route for
    /// the same path and always answers with an empty body.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();

        let Ok(method) = Method::try_from(&parts.method) else {
            return Response::status(Status::MethodNotAllowed);
        };

        // `/posts/` routes like `/posts`.
        let raw = parts.uri.path();
        let path = match raw.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => raw,
        };

        let found = self.lookup(method, path).or_else(|| match method {
            Method::Head => self.lookup(Method::Get, path),
            _ => None,
        });

        match found {
            Some((handler, params)) => {
                let req = Request::new(path.to_owned(), parts.headers, body, params);
                let mut res = handler.call(self.state.clone(), req).await;
                if method == Method::Head {
                    res.body = Bytes::new();
                }
                res
            }
            None => {
                debug!(%method, path, "no route");
                Response::message(Status::NotFound, format!("Cannot {method} {path}"))
            }
        }
    }
}
