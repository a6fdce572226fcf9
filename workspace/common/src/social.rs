use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub username: String,
    pub text: String,
}

/// Feed post. `liked`/`bookmarked` are per-viewer flags; the REST backend
/// does not send them, so they default to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i64,
    pub username: String,
    pub timestamp: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub liked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<u32>,
    #[serde(default)]
    pub bookmarked: bool,
}

impl Post {
    /// Flips `liked` and recomputes the counter from the new flag.
    pub fn toggle_like(&mut self) {
        self.liked = !self.liked;
        self.likes = if self.liked {
            self.likes.saturating_add(1)
        } else {
            self.likes.saturating_sub(1)
        };
    }

    pub fn toggle_bookmark(&mut self) {
        self.bookmarked = !self.bookmarked;
        let count = self.bookmarks.unwrap_or(0);
        self.bookmarks = Some(if self.bookmarked {
            count.saturating_add(1)
        } else {
            count.saturating_sub(1)
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePostRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateCommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikeResponse {
    pub liked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookmarkResponse {
    pub bookmarked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        serde_json::from_str(
            r#"{"id":9,"username":"alice","timestamp":"2025-05-01 09:00","content":"5k done","likes":2,
                "comments":[{"username":"bob","text":"nice"}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_rest_post_defaults() {
        let post = post();
        assert!(!post.liked);
        assert!(!post.bookmarked);
        assert_eq!(post.bookmarks, None);
        assert_eq!(post.image, None);
        assert_eq!(post.comments.len(), 1);
    }

    #[test]
    fn test_like_toggle_twice_restores_count() {
        let mut post = post();
        post.toggle_like();
        assert!(post.liked);
        assert_eq!(post.likes, 3);
        post.toggle_like();
        assert!(!post.liked);
        assert_eq!(post.likes, 2);
    }

    #[test]
    fn test_bookmark_toggle_starts_counter() {
        let mut post = post();
        post.toggle_bookmark();
        assert_eq!(post.bookmarks, Some(1));
        post.toggle_bookmark();
        assert_eq!(post.bookmarks, Some(0));
    }
}
