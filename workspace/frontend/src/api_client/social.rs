use common::{
    BookmarkResponse, CreateCommentRequest, CreatePostRequest, CsrfTokenResponse, LikeResponse,
    Post, SuccessResponse,
};

use super::ApiError;
use crate::api_client;

/// Header carrying the CSRF token on every social mutation.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Headers sent with every social mutation.
pub fn mutation_headers(csrf_token: &str) -> [(&'static str, &str); 2] {
    [("Content-Type", api_client::JSON_CONTENT_TYPE), (CSRF_HEADER, csrf_token)]
}

pub async fn get_csrf_token() -> Result<String, ApiError> {
    log::trace!("Fetching CSRF token");
    let result = api_client::get::<CsrfTokenResponse>("/api/csrf-token")
        .await
        .map(|r| r.csrf_token);
    if let Err(ref e) = result {
        log::error!("Failed to fetch CSRF token: {}", e);
    }
    result
}

pub async fn get_posts() -> Result<Vec<Post>, ApiError> {
    log::trace!("Fetching posts");
    let result = api_client::get::<Vec<Post>>("/api/posts").await;
    match &result {
        Ok(posts) => log::info!("Fetched {} posts", posts.len()),
        Err(e) => log::error!("Failed to fetch posts: {}", e),
    }
    result
}

pub async fn create_post(csrf_token: &str, content: &str) -> Result<SuccessResponse, ApiError> {
    log::debug!("Creating post ({} chars)", content.len());
    let request = CreatePostRequest { content: content.to_string() };
    api_client::post("/api/posts", &request, &mutation_headers(csrf_token)).await
}

pub async fn create_comment(
    csrf_token: &str,
    post_id: i64,
    text: &str,
) -> Result<SuccessResponse, ApiError> {
    log::debug!("Commenting on post {}", post_id);
    let request = CreateCommentRequest { text: text.to_string() };
    let url = format!("/api/posts/{}/comments", post_id);
    api_client::post(&url, &request, &mutation_headers(csrf_token)).await
}

pub async fn toggle_like(csrf_token: &str, post_id: i64) -> Result<LikeResponse, ApiError> {
    log::debug!("Toggling like on post {}", post_id);
    let url = format!("/api/posts/{}/like", post_id);
    api_client::post_empty(&url, &mutation_headers(csrf_token)).await
}

pub async fn toggle_bookmark(csrf_token: &str, post_id: i64) -> Result<BookmarkResponse, ApiError> {
    log::debug!("Toggling bookmark on post {}", post_id);
    let url = format!("/api/posts/{}/bookmark", post_id);
    api_client::post_empty(&url, &mutation_headers(csrf_token)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_headers_carry_token_and_json_type() {
        let headers = mutation_headers("abc123");
        assert!(headers.contains(&("X-CSRFToken", "abc123")));
        assert!(headers.contains(&("Content-Type", "application/json")));

        let empty = mutation_headers("");
        assert!(empty.contains(&(CSRF_HEADER, "")));
    }
}
