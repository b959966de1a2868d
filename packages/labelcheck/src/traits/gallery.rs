//! Gallery scraper trait — site-specific image URL discovery.
//!
//! Each supported grocery site keeps its DOM knowledge behind this seam;
//! the pipeline depends only on "product URL in, gallery image URLs out"
//! and never on a specific site's markup.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use url::Url;

use crate::error::AcquireResult;

/// Site-specific product-gallery discovery.
#[async_trait]
pub trait GalleryScraper: Send + Sync {
    /// Fetch the image URLs of the product page's gallery, in page order.
    ///
    /// Returned URLs are raw (pre-rewrite); the acquisition layer applies
    /// the site's high-resolution rewrite rules afterwards.
    async fn fetch_gallery_urls(&self, product_url: &Url) -> AcquireResult<Vec<Url>>;

    /// Scraper name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Mock gallery scraper for testing.
#[derive(Default)]
pub struct MockGalleryScraper {
    galleries: RwLock<HashMap<String, Vec<Url>>>,
}

impl MockGalleryScraper {
    /// Create a new mock scraper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a gallery for a product URL.
    pub fn with_gallery(self, product_url: &str, image_urls: &[&str]) -> Self {
        let urls = image_urls
            .iter()
            .filter_map(|u| Url::parse(u).ok())
            .collect();
        self.galleries
            .write()
            .unwrap()
            .insert(product_url.to_string(), urls);
        self
    }
}

#[async_trait]
impl GalleryScraper for MockGalleryScraper {
    async fn fetch_gallery_urls(&self, product_url: &Url) -> AcquireResult<Vec<Url>> {
        Ok(self
            .galleries
            .read()
            .unwrap()
            .get(product_url.as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gallery_scraper() {
        let scraper = MockGalleryScraper::new().with_gallery(
            "https://blinkit.com/prn/ketchup/prid/436913",
            &[
                "https://cdn.example.com/1.jpg",
                "https://cdn.example.com/2.jpg",
            ],
        );

        let product = Url::parse("https://blinkit.com/prn/ketchup/prid/436913").unwrap();
        let urls = scraper.fetch_gallery_urls(&product).await.unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0].as_str(), "https://cdn.example.com/1.jpg");
    }

    #[tokio::test]
    async fn test_unknown_product_yields_empty_gallery() {
        let scraper = MockGalleryScraper::new();
        let product = Url::parse("https://blinkit.com/prn/unknown/prid/1").unwrap();
        let urls = scraper.fetch_gallery_urls(&product).await.unwrap();
        assert!(urls.is_empty());
    }
}
