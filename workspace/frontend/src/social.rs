//! Social feed over one of two interchangeable posts repositories.
//!
//! [`SocialFeed`] validates input, forwards the mutation and then reloads the
//! whole list, so the view is always a fresh snapshot of the repository.

pub mod local;
pub mod rest;
pub mod storage;

use async_trait::async_trait;
use common::{validate_comment_text, validate_post_content, Post, ValidationError};
use std::rc::Rc;
use thiserror::Error;

use crate::api_client::ApiError;
use crate::settings::SocialMode;

pub use self::local::LocalPostsRepository;
pub use self::rest::{HttpSocialTransport, RestPostsRepository, SocialTransport};
pub use self::storage::{BrowserStorage, KeyValueStore, MemoryStorage};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SocialError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered without reporting success.
    #[error("{}", .0.as_deref().unwrap_or("Request was not accepted"))]
    Rejected(Option<String>),

    #[error("Post {0} not found")]
    PostNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait(?Send)]
pub trait PostsRepository {
    async fn load_posts(&self) -> Result<Vec<Post>, SocialError>;
    async fn submit_post(&self, content: &str) -> Result<(), SocialError>;
    async fn submit_comment(&self, post_id: i64, text: &str) -> Result<(), SocialError>;
    /// Returns the new `liked` flag.
    async fn like_post(&self, post_id: i64) -> Result<bool, SocialError>;
    /// Returns the new `bookmarked` flag.
    async fn bookmark_post(&self, post_id: i64) -> Result<bool, SocialError>;
}

#[derive(Clone)]
pub struct SocialFeed {
    repository: Rc<dyn PostsRepository>,
}

impl PartialEq for SocialFeed {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.repository, &other.repository)
    }
}

impl SocialFeed {
    pub fn new(repository: Rc<dyn PostsRepository>) -> Self {
        Self { repository }
    }

    /// Picks the repository for `mode`. The REST variant fetches its CSRF token here.
    pub async fn connect(mode: SocialMode) -> Self {
        log::info!("Starting social feed in {} mode", mode.as_str());
        let repository: Rc<dyn PostsRepository> = match mode {
            SocialMode::Rest => Rc::new(RestPostsRepository::connect(HttpSocialTransport).await),
            SocialMode::Local => Rc::new(LocalPostsRepository::new(BrowserStorage)),
        };
        Self::new(repository)
    }

    pub async fn load_posts(&self) -> Result<Vec<Post>, SocialError> {
        self.repository.load_posts().await
    }

    pub async fn submit_post(&self, content: &str) -> Result<Vec<Post>, SocialError> {
        let content = validate_post_content(content)?;
        self.repository.submit_post(&content).await?;
        self.load_posts().await
    }

    pub async fn submit_comment(&self, post_id: i64, text: &str) -> Result<Vec<Post>, SocialError> {
        let text = validate_comment_text(text)?;
        self.repository.submit_comment(post_id, &text).await?;
        self.load_posts().await
    }

    pub async fn like_post(&self, post_id: i64) -> Result<Vec<Post>, SocialError> {
        let liked = self.repository.like_post(post_id).await?;
        log::debug!("Post {} liked={}", post_id, liked);
        self.load_posts().await
    }

    pub async fn bookmark_post(&self, post_id: i64) -> Result<Vec<Post>, SocialError> {
        let bookmarked = self.repository.bookmark_post(post_id).await?;
        log::debug!("Post {} bookmarked={}", post_id, bookmarked);
        self.load_posts().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn feed() -> (SocialFeed, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::default());
        let feed = SocialFeed::new(Rc::new(LocalPostsRepository::new(storage.clone())));
        (feed, storage)
    }

    /// Wraps a repository and counts calls.
    struct Counting<R> {
        inner: R,
        loads: Cell<usize>,
        mutations: Cell<usize>,
    }

    impl<R> Counting<R> {
        fn new(inner: R) -> Rc<Self> {
            Rc::new(Self { inner, loads: Cell::new(0), mutations: Cell::new(0) })
        }

        fn mutated(&self) {
            self.mutations.set(self.mutations.get() + 1);
        }
    }

    #[async_trait(?Send)]
    impl<R: PostsRepository> PostsRepository for Counting<R> {
        async fn load_posts(&self) -> Result<Vec<Post>, SocialError> {
            self.loads.set(self.loads.get() + 1);
            self.inner.load_posts().await
        }

        async fn submit_post(&self, content: &str) -> Result<(), SocialError> {
            self.mutated();
            self.inner.submit_post(content).await
        }

        async fn submit_comment(&self, post_id: i64, text: &str) -> Result<(), SocialError> {
            self.mutated();
            self.inner.submit_comment(post_id, text).await
        }

        async fn like_post(&self, post_id: i64) -> Result<bool, SocialError> {
            self.mutated();
            self.inner.like_post(post_id).await
        }

        async fn bookmark_post(&self, post_id: i64) -> Result<bool, SocialError> {
            self.mutated();
            self.inner.bookmark_post(post_id).await
        }
    }

    #[tokio::test]
    async fn test_like_twice_restores_count() {
        let (feed, _) = feed();
        let before = feed.load_posts().await.unwrap();
        let id = before[0].id;

        let once = feed.like_post(id).await.unwrap();
        let twice = feed.like_post(id).await.unwrap();

        let find = |posts: &[Post]| posts.iter().find(|p| p.id == id).cloned().unwrap();
        assert_eq!(find(&once).likes, find(&before).likes + 1);
        assert!(find(&once).liked);
        assert_eq!(find(&twice).likes, find(&before).likes);
        assert!(!find(&twice).liked);
    }

    #[tokio::test]
    async fn test_every_mutation_reloads() {
        let repository = Counting::new(LocalPostsRepository::new(MemoryStorage::default()));
        let feed = SocialFeed::new(repository.clone());
        let posts = feed.load_posts().await.unwrap();
        let id = posts[0].id;

        feed.submit_post("Morning run done").await.unwrap();
        feed.submit_comment(id, "Nice").await.unwrap();
        feed.like_post(id).await.unwrap();
        feed.bookmark_post(id).await.unwrap();

        assert_eq!(repository.mutations.get(), 4);
        assert_eq!(repository.loads.get(), 5);
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_repository() {
        let repository = Counting::new(LocalPostsRepository::new(MemoryStorage::default()));
        let feed = SocialFeed::new(repository.clone());

        let post = feed.submit_post("   ").await;
        let comment = feed.submit_comment(1, "").await;

        assert_eq!(post, Err(SocialError::Validation(ValidationError::EmptyContent)));
        assert_eq!(comment, Err(SocialError::Validation(ValidationError::EmptyComment)));
        assert_eq!(repository.mutations.get(), 0);
        assert_eq!(repository.loads.get(), 0);
    }

    #[tokio::test]
    async fn test_posts_survive_new_feed_instance() {
        let (feed, storage) = feed();
        let posts = feed.submit_post("Leg day").await.unwrap();
        assert_eq!(posts[0].content, "Leg day");

        let reopened = SocialFeed::new(Rc::new(LocalPostsRepository::new(storage)));
        let posts = reopened.load_posts().await.unwrap();
        assert_eq!(posts[0].content, "Leg day");
    }

    #[test]
    fn test_feed_equality_is_identity() {
        let (a, _) = feed();
        let b = a.clone();
        let (c, _) = feed();
        assert!(a == b);
        assert!(a != c);
    }
}
