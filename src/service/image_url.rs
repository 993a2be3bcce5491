//! Image key to viewable URL resolution.

use std::sync::Arc;

use crate::storage::StorageGateway;

/// Outcome of resolving a post's image key.
///
/// `Suppressed` keeps the failure visible to logging while the response
/// still renders the post with `image_url: null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageUrl {
    /// A URL the browser can load.
    Resolved(String),
    /// The post has no image.
    NoImage,
    /// Resolution failed; the reason is logged and the URL omitted.
    Suppressed(String),
}

impl ImageUrl {
    /// Collapses the outcome to the wire value.
    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Resolved(url) => Some(url),
            Self::NoImage | Self::Suppressed(_) => None,
        }
    }
}

/// Turns stored image keys into URLs, either through a public CDN
/// hostname or a presigned `GET`.
#[derive(Debug, Clone)]
pub struct ImageUrlResolver {
    gateway: Arc<StorageGateway>,
    cdn_domain: Option<String>,
    view_expires_in: u64,
}

impl ImageUrlResolver {
    /// Creates a resolver. `cdn_domain` takes precedence over signing.
    #[must_use]
    pub fn new(
        gateway: Arc<StorageGateway>,
        cdn_domain: Option<String>,
        view_expires_in: u64,
    ) -> Self {
        Self {
            gateway,
            cdn_domain: cdn_domain.filter(|d| !d.is_empty()),
            view_expires_in,
        }
    }

    /// Resolves `image_key`. Never fails; errors become
    /// [`ImageUrl::Suppressed`].
    pub async fn resolve(&self, image_key: Option<&str>) -> ImageUrl {
        let Some(key) = image_key.filter(|k| !k.is_empty()) else {
            return ImageUrl::NoImage;
        };

        if let Some(cdn) = &self.cdn_domain {
            return ImageUrl::Resolved(format!("https://{cdn}/{key}"));
        }

        match self
            .gateway
            .create_view_authorization(key, self.view_expires_in)
            .await
        {
            Ok(url) => ImageUrl::Resolved(url),
            Err(e) => {
                tracing::warn!(%key, error = %e, "image url resolution suppressed");
                ImageUrl::Suppressed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::storage::gateway::testing::static_gateway;

    fn gateway(bucket: Option<&str>) -> Arc<StorageGateway> {
        Arc::new(static_gateway(bucket, "us-west-2"))
    }

    #[tokio::test]
    async fn absent_or_empty_key_is_no_image() {
        let resolver = ImageUrlResolver::new(gateway(Some("board")), None, 3600);
        assert_eq!(resolver.resolve(None).await, ImageUrl::NoImage);
        assert_eq!(resolver.resolve(Some("")).await, ImageUrl::NoImage);
    }

    #[tokio::test]
    async fn cdn_domain_wins_without_signing() {
        let resolver =
            ImageUrlResolver::new(gateway(None), Some("cdn.example.com".to_string()), 3600);
        assert_eq!(
            resolver.resolve(Some("uploads/abc_cat.png")).await,
            ImageUrl::Resolved("https://cdn.example.com/uploads/abc_cat.png".to_string())
        );
    }

    #[tokio::test]
    async fn presigned_url_targets_bucket_and_key() {
        let resolver = ImageUrlResolver::new(gateway(Some("board")), None, 3600);
        let ImageUrl::Resolved(url) = resolver.resolve(Some("uploads/abc_cat.png")).await else {
            panic!("expected a resolved url");
        };
        assert!(url.starts_with("https://board.s3.us-west-2.amazonaws.com/"));
        assert!(url.contains("uploads/abc_cat.png"));
        assert!(url.contains("X-Amz-Expires=3600"));
    }

    #[tokio::test]
    async fn signing_failure_is_suppressed() {
        let resolver = ImageUrlResolver::new(gateway(None), None, 3600);
        let outcome = resolver.resolve(Some("uploads/abc_cat.png")).await;
        assert!(matches!(outcome, ImageUrl::Suppressed(_)));
        assert_eq!(outcome.into_option(), None);
    }
}
