//! The `/posts` routes.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | /posts | 200, every post |
//! | GET | /posts/{id} | 200, one post |
//! | POST | /posts | 201, the created post |
//! | PATCH | /posts/{id} | 200, the merged post |
//! | DELETE | /posts/{id} | 204, no body |
//!
//! Failures are `{"message": "..."}` with 400 or 404, see [`PostError`].

use std::sync::Arc;

use crate::error::PostError;
use crate::post::{PostId, PostInput};
use crate::response::{IntoResponse, Json, Response};
use crate::store::PostStore;
use crate::{Method, Request, Router, Status};

type Store = Arc<PostStore>;

/// The full post API over `store`.
pub fn router(store: Store) -> Router<Store> {
    Router::with_state(store)
        .on(Method::Get,    "/posts",      list_posts)
        .on(Method::Post,   "/posts",      create_post)
        .on(Method::Get,    "/posts/{id}", get_post)
        .on(Method::Patch,  "/posts/{id}", patch_post)
        .on(Method::Delete, "/posts/{id}", delete_post)
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        Response::message(self.status(), self.to_string())
    }
}

async fn list_posts(store: Store, _req: Request) -> Result<Json<Vec<crate::Post>>, PostError> {
    store.list().await.map(Json)
}

async fn get_post(store: Store, req: Request) -> Result<impl IntoResponse, PostError> {
    store.get(path_id(&req)).await.map(Json)
}

async fn create_post(store: Store, req: Request) -> Result<Response, PostError> {
    let input = body(&req)?;
    let post = store.create(input).await?;
    Ok(Json(post).with_status(Status::Created))
}

async fn patch_post(store: Store, req: Request) -> Result<impl IntoResponse, PostError> {
    let id = path_id(&req);
    let input = body(&req)?;
    store.update(id, input).await.map(Json)
}

async fn delete_post(store: Store, req: Request) -> Result<Status, PostError> {
    store.delete(path_id(&req)).await?;
    Ok(Status::NoContent)
}

fn path_id(req: &Request) -> PostId {
    PostId::parse(req.param("id").unwrap_or_default())
}

fn body(req: &Request) -> Result<PostInput, PostError> {
    Ok(req.form_or_json()?)
}
