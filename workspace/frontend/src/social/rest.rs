use async_trait::async_trait;
use common::{BookmarkResponse, LikeResponse, Post, SuccessResponse};

use super::{PostsRepository, SocialError};
use crate::api_client::social as api;
use crate::api_client::ApiError;

/// Calls behind the REST repository. Mutations take the token to send.
#[async_trait(?Send)]
pub trait SocialTransport {
    async fn csrf_token(&self) -> Result<String, ApiError>;
    async fn posts(&self) -> Result<Vec<Post>, ApiError>;
    async fn create_post(&self, csrf_token: &str, content: &str) -> Result<SuccessResponse, ApiError>;
    async fn create_comment(&self, csrf_token: &str, post_id: i64, text: &str) -> Result<SuccessResponse, ApiError>;
    async fn toggle_like(&self, csrf_token: &str, post_id: i64) -> Result<LikeResponse, ApiError>;
    async fn toggle_bookmark(&self, csrf_token: &str, post_id: i64) -> Result<BookmarkResponse, ApiError>;
}

/// The `/api/posts` endpoints.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpSocialTransport;

#[async_trait(?Send)]
impl SocialTransport for HttpSocialTransport {
    async fn csrf_token(&self) -> Result<String, ApiError> {
        api::get_csrf_token().await
    }

    async fn posts(&self) -> Result<Vec<Post>, ApiError> {
        api::get_posts().await
    }

    async fn create_post(&self, csrf_token: &str, content: &str) -> Result<SuccessResponse, ApiError> {
        api::create_post(csrf_token, content).await
    }

    async fn create_comment(&self, csrf_token: &str, post_id: i64, text: &str) -> Result<SuccessResponse, ApiError> {
        api::create_comment(csrf_token, post_id, text).await
    }

    async fn toggle_like(&self, csrf_token: &str, post_id: i64) -> Result<LikeResponse, ApiError> {
        api::toggle_like(csrf_token, post_id).await
    }

    async fn toggle_bookmark(&self, csrf_token: &str, post_id: i64) -> Result<BookmarkResponse, ApiError> {
        api::toggle_bookmark(csrf_token, post_id).await
    }
}

/// Posts served by the backend. Mutations carry the CSRF token obtained once
/// in [`connect`](Self::connect); it lives as long as the page.
#[derive(Debug, Clone)]
pub struct RestPostsRepository<T = HttpSocialTransport> {
    transport: T,
    csrf_token: String,
}

impl<T: SocialTransport> RestPostsRepository<T> {
    /// Fetches the CSRF token. Without one, reads still work and the server
    /// rejects mutations.
    pub async fn connect(transport: T) -> Self {
        let csrf_token = match transport.csrf_token().await {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Continuing without CSRF token: {}", e);
                String::new()
            }
        };
        Self { transport, csrf_token }
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

fn accepted(response: SuccessResponse) -> Result<(), SocialError> {
    if response.success {
        Ok(())
    } else {
        Err(SocialError::Rejected(response.error))
    }
}

#[async_trait(?Send)]
impl<T: SocialTransport> PostsRepository for RestPostsRepository<T> {
    async fn load_posts(&self) -> Result<Vec<Post>, SocialError> {
        Ok(self.transport.posts().await?)
    }

    async fn submit_post(&self, content: &str) -> Result<(), SocialError> {
        accepted(self.transport.create_post(&self.csrf_token, content).await?)
    }

    async fn submit_comment(&self, post_id: i64, text: &str) -> Result<(), SocialError> {
        accepted(self.transport.create_comment(&self.csrf_token, post_id, text).await?)
    }

    async fn like_post(&self, post_id: i64) -> Result<bool, SocialError> {
        Ok(self.transport.toggle_like(&self.csrf_token, post_id).await?.liked)
    }

    async fn bookmark_post(&self, post_id: i64) -> Result<bool, SocialError> {
        Ok(self.transport.toggle_bookmark(&self.csrf_token, post_id).await?.bookmarked)
    }
}
