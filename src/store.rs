//! In-memory post storage.
//!
//! A `Vec` in insertion order plus the last id handed out, both behind one
//! async mutex. Every operation takes the lock once and does its whole
//! read-compute-mutate step under it, so ids stay unique and strictly
//! increasing no matter how many requests are in flight.

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::PostError;
use crate::post::{self, Post, PostId, PostInput};

pub struct PostStore {
    inner: Mutex<Inner>,
}

struct Inner {
    posts: Vec<Post>,
    last_id: i64,
}

impl Inner {
    fn position(&self, id: PostId) -> Option<usize> {
        self.posts.iter().position(|p| id.matches(p.id))
    }
}

impl PostStore {
    /// A store holding the three seed posts, with the counter at 3.
    pub fn seeded() -> Self {
        let posts = post::seed();
        let last_id = posts.iter().map(|p| p.id).max().unwrap_or(0);
        Self::from_parts(posts, last_id)
    }

    /// An empty store whose next id is 1.
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), 0)
    }

    fn from_parts(posts: Vec<Post>, last_id: i64) -> Self {
        Self { inner: Mutex::new(Inner { posts, last_id }) }
    }

    /// All posts in insertion order. An empty store is an error.
    pub async fn list(&self) -> Result<Vec<Post>, PostError> {
        let inner = self.inner.lock().await;
        if inner.posts.is_empty() {
            return Err(PostError::NoPosts);
        }
        Ok(inner.posts.clone())
    }

    pub async fn get(&self, id: PostId) -> Result<Post, PostError> {
        let inner = self.inner.lock().await;
        inner.posts.iter()
            .find(|p| id.matches(p.id))
            .cloned()
            .ok_or(PostError::NoMatch(id))
    }

    /// Appends a new post. The counter only moves when validation passes.
    pub async fn create(&self, input: PostInput) -> Result<Post, PostError> {
        let (Some(title), Some(content), Some(author)) =
            (input.title(), input.content(), input.author())
        else {
            return Err(PostError::Missing(input.missing()));
        };

        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let post = Post {
            id: inner.last_id,
            title: title.to_owned(),
            content: content.to_owned(),
            author: author.to_owned(),
            date: Utc::now(),
        };
        inner.posts.push(post.clone());
        debug!(id = post.id, "post created");
        Ok(post)
    }

    /// Merges the supplied fields into an existing post and refreshes its
    /// date. A missing post wins over an empty body.
    pub async fn update(&self, id: PostId, input: PostInput) -> Result<Post, PostError> {
        let mut inner = self.inner.lock().await;
        let idx = inner.position(id).ok_or(PostError::NotFound)?;
        if input.is_empty() {
            return Err(PostError::NoFieldsProvided);
        }

        let post = &mut inner.posts[idx];
        if let Some(title) = input.title() {
            post.title = title.to_owned();
        }
        if let Some(content) = input.content() {
            post.content = content.to_owned();
        }
        if let Some(author) = input.author() {
            post.author = author.to_owned();
        }
        post.date = Utc::now();
        debug!(id = post.id, "post updated");
        Ok(post.clone())
    }

    pub async fn delete(&self, id: PostId) -> Result<(), PostError> {
        let mut inner = self.inner.lock().await;
        let idx = inner.position(id).ok_or(PostError::NotFound)?;
        let removed = inner.posts.remove(idx);
        debug!(id = removed.id, "post deleted");
        Ok(())
    }
}

impl Default for PostStore {
    fn default() -> Self { Self::seeded() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(title: &str) -> PostInput {
        PostInput::new(Some(title), Some("body"), Some("someone"))
    }

    #[tokio::test]
    async fn ids_keep_increasing_across_deletes() {
        let store = PostStore::seeded();
        let a = store.create(full("a")).await.unwrap();
        assert_eq!(a.id, 4);
        store.delete(PostId::from(4)).await.unwrap();
        store.delete(PostId::from(3)).await.unwrap();
        let b = store.create(full("b")).await.unwrap();
        assert_eq!(b.id, 5);
    }

    #[tokio::test]
    async fn failed_create_does_not_consume_an_id() {
        let store = PostStore::seeded();
        let err = store.create(PostInput::new(Some("t"), Some(""), None)).await.unwrap_err();
        assert_eq!(err, PostError::Missing(vec!["content", "author"]));
        assert_eq!(store.create(full("ok")).await.unwrap().id, 4);
    }

    #[tokio::test]
    async fn list_of_empty_store_is_an_error() {
        let store = PostStore::empty();
        assert_eq!(store.list().await.unwrap_err(), PostError::NoPosts);
        assert_eq!(store.create(full("first")).await.unwrap().id, 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_checks_existence_before_fields() {
        let store = PostStore::seeded();
        let err = store.update(PostId::from(999), PostInput::default()).await.unwrap_err();
        assert_eq!(err, PostError::NotFound);
        let err = store.update(PostId::from(1), PostInput::default()).await.unwrap_err();
        assert_eq!(err, PostError::NoFieldsProvided);
    }

    #[tokio::test]
    async fn update_merges_and_keeps_position() {
        let store = PostStore::seeded();
        let before = store.get(PostId::from(2)).await.unwrap();
        let after = store
            .update(PostId::from(2), PostInput::new(None, Some("new"), Some("")))
            .await
            .unwrap();
        assert_eq!(after.id, 2);
        assert_eq!(after.title, before.title);
        assert_eq!(after.author, before.author);
        assert_eq!(after.content, "new");
        assert!(after.date > before.date);

        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn delete_preserves_order_of_the_rest() {
        let store = PostStore::seeded();
        store.delete(PostId::from(2)).await.unwrap();
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.get(PostId::from(2)).await.unwrap_err(), PostError::NoMatch(PostId::from(2)));
    }

    #[tokio::test]
    async fn deleting_a_missing_id_is_repeatable() {
        let store = PostStore::seeded();
        for _ in 0..2 {
            assert_eq!(store.delete(PostId::from(42)).await.unwrap_err(), PostError::NotFound);
        }
        assert_eq!(store.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = std::sync::Arc::new(PostStore::seeded());
        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.spawn(async move { store.create(full(&format!("p{i}"))).await.unwrap().id });
        }
        let mut ids = Vec::new();
        while let Some(id) = tasks.join_next().await {
            ids.push(id.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (4..20).collect::<Vec<i64>>());
    }
}
