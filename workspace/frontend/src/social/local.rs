use async_trait::async_trait;
use common::{Comment, Post};

use super::{KeyValueStore, PostsRepository, SocialError};

/// Storage key holding the JSON array of posts.
pub const POSTS_KEY: &str = "fitrack_posts";

/// Author of everything created in the demo feed.
const LOCAL_USER: &str = "You";

/// Demo feed kept entirely in browser storage. Like and bookmark toggle a
/// per-post flag and recompute the counter from it.
pub struct LocalPostsRepository<S> {
    storage: S,
}

impl<S: KeyValueStore> LocalPostsRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn read(&self) -> Result<Vec<Post>, SocialError> {
        let stored = self.storage.get_item(POSTS_KEY);
        if let Some(json) = stored {
            match serde_json::from_str::<Vec<Post>>(&json) {
                Ok(posts) => return Ok(posts),
                Err(e) => log::warn!("Discarding unreadable local posts: {}", e),
            }
        }
        let posts = seed_posts();
        log::debug!("Seeding local feed with {} demo posts", posts.len());
        self.write(&posts)?;
        Ok(posts)
    }

    fn write(&self, posts: &[Post]) -> Result<(), SocialError> {
        let json = serde_json::to_string(posts).map_err(|e| SocialError::Storage(e.to_string()))?;
        self.storage.set_item(POSTS_KEY, &json)
    }

    fn modify<T>(&self, post_id: i64, change: impl FnOnce(&mut Post) -> T) -> Result<T, SocialError> {
        let mut posts = self.read()?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(SocialError::PostNotFound(post_id))?;
        let result = change(post);
        self.write(&posts)?;
        Ok(result)
    }
}

#[async_trait(?Send)]
impl<S: KeyValueStore> PostsRepository for LocalPostsRepository<S> {
    async fn load_posts(&self) -> Result<Vec<Post>, SocialError> {
        self.read()
    }

    async fn submit_post(&self, content: &str) -> Result<(), SocialError> {
        let mut posts = self.read()?;
        let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        posts.insert(
            0,
            Post {
                id,
                username: LOCAL_USER.to_string(),
                timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
                content: content.to_string(),
                image: None,
                likes: 0,
                comments: Vec::new(),
                liked: false,
                bookmarks: Some(0),
                bookmarked: false,
            },
        );
        log::info!("Created local post {}", id);
        self.write(&posts)
    }

    async fn submit_comment(&self, post_id: i64, text: &str) -> Result<(), SocialError> {
        self.modify(post_id, |post| {
            post.comments.push(Comment {
                username: LOCAL_USER.to_string(),
                text: text.to_string(),
            })
        })
    }

    async fn like_post(&self, post_id: i64) -> Result<bool, SocialError> {
        self.modify(post_id, |post| {
            post.toggle_like();
            post.liked
        })
    }

    async fn bookmark_post(&self, post_id: i64) -> Result<bool, SocialError> {
        self.modify(post_id, |post| {
            post.toggle_bookmark();
            post.bookmarked
        })
    }
}

fn comment(username: &str, text: &str) -> Comment {
    Comment {
        username: username.to_string(),
        text: text.to_string(),
    }
}

fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: 3,
            username: "charlie".to_string(),
            timestamp: "2025-05-02 18:30".to_string(),
            content: "Keep going! charlie is crushing it this week!".to_string(),
            image: None,
            likes: 1,
            comments: Vec::new(),
            liked: false,
            bookmarks: Some(2),
            bookmarked: false,
        },
        Post {
            id: 2,
            username: "bob".to_string(),
            timestamp: "2025-05-02 07:10".to_string(),
            content: "bob completed a 45-min Cycling session!".to_string(),
            image: None,
            likes: 0,
            comments: vec![comment("charlie", "Awesome work!")],
            liked: false,
            bookmarks: Some(0),
            bookmarked: false,
        },
        Post {
            id: 1,
            username: "alice".to_string(),
            timestamp: "2025-05-01 06:45".to_string(),
            content: "alice completed a 30-min Running session!".to_string(),
            image: None,
            likes: 3,
            comments: vec![comment("bob", "Awesome work!"), comment("charlie", "Keep it up!")],
            liked: false,
            bookmarks: Some(1),
            bookmarked: false,
        },
    ]
}
