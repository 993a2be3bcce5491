//! Post service: writes posts and shapes them for responses.

use std::sync::Arc;

use crate::domain::Post;
use crate::error::BoardError;
use crate::persistence::PostStore;

use super::{ImageUrl, ImageUrlResolver};

/// A stored post paired with its resolved image URL.
#[derive(Debug, Clone)]
pub struct PostView {
    /// The stored row.
    pub post: Post,
    /// Resolution outcome for `post.image_key`.
    pub image_url: ImageUrl,
}

/// Orchestrates the post store and image URL resolution.
///
/// Image URLs are resolved on every call and never cached, so presigned
/// URLs are always freshly signed.
#[derive(Debug, Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    resolver: ImageUrlResolver,
}

impl PostService {
    /// Creates a new `PostService`.
    #[must_use]
    pub fn new(store: Arc<dyn PostStore>, resolver: ImageUrlResolver) -> Self {
        Self { store, resolver }
    }

    /// Stores a new post. An empty `image_key` is stored as no image.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the store fails.
    pub async fn create_post(
        &self,
        message: &str,
        image_key: Option<&str>,
    ) -> Result<PostView, BoardError> {
        let image_key = image_key.filter(|k| !k.is_empty());
        let post = self.store.insert_post(message, image_key).await?;
        tracing::info!(post_id = post.id, has_image = image_key.is_some(), "post created");
        Ok(self.view(post).await)
    }

    /// Lists the newest posts, `limit` clamped to `[1, 100]`.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the store fails.
    pub async fn list_posts(&self, limit: i64) -> Result<Vec<PostView>, BoardError> {
        let posts = self.store.list_posts(limit).await?;
        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            views.push(self.view(post).await);
        }
        Ok(views)
    }

    async fn view(&self, post: Post) -> PostView {
        let image_url = self.resolver.resolve(post.image_key()).await;
        PostView { post, image_url }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPostStore;
    use crate::storage::gateway::testing::static_gateway;

    fn make_service(cdn: Option<&str>) -> PostService {
        let gateway = Arc::new(static_gateway(None, "us-east-1"));
        let resolver = ImageUrlResolver::new(gateway, cdn.map(str::to_string), 3600);
        PostService::new(Arc::new(MemoryPostStore::new()), resolver)
    }

    #[tokio::test]
    async fn created_post_with_cdn_lists_with_image_url() {
        let service = make_service(Some("cdn.example.com"));
        let Ok(created) = service
            .create_post("hello", Some("uploads/abc_cat.png"))
            .await
        else {
            panic!("create failed");
        };
        assert_eq!(
            created.image_url,
            ImageUrl::Resolved("https://cdn.example.com/uploads/abc_cat.png".to_string())
        );

        let Ok(listed) = service.list_posts(50).await else {
            panic!("list failed");
        };
        let Some(first) = listed.first() else {
            panic!("empty listing");
        };
        assert_eq!(first.post.id, created.post.id);
        assert_eq!(first.image_url, created.image_url);
    }

    #[tokio::test]
    async fn empty_image_key_is_stored_as_none() {
        let service = make_service(None);
        let Ok(created) = service.create_post("no pic", Some("")).await else {
            panic!("create failed");
        };
        assert_eq!(created.post.image_key, None);
        assert_eq!(created.image_url, ImageUrl::NoImage);
    }

    #[tokio::test]
    async fn unconfigured_storage_suppresses_image_url() {
        let service = make_service(None);
        let Ok(created) = service.create_post("pic", Some("uploads/k_a.png")).await else {
            panic!("create failed");
        };
        assert!(matches!(created.image_url, ImageUrl::Suppressed(_)));
    }
}
