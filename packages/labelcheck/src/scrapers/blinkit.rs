//! Blinkit product-gallery scraper.

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{AcquireError, AcquireResult};
use crate::traits::gallery::GalleryScraper;

use super::{fetch_html, gallery_client};

/// Blinkit renders its product carousel with styled-component classes; the
/// image class prefix has been stable across their releases.
const CAROUSEL_IMG_SELECTOR: &str = r#"img[class^="ProductCarousel__CarouselImage"]"#;

/// Scrapes Blinkit product pages for gallery image URLs.
pub struct BlinkitScraper {
    client: reqwest::Client,
}

impl Default for BlinkitScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkitScraper {
    /// Create a new Blinkit scraper.
    pub fn new() -> Self {
        Self {
            client: gallery_client(),
        }
    }

    fn parse_gallery(html: &str) -> Vec<Url> {
        let document = Html::parse_document(html);
        let selector = match Selector::parse(CAROUSEL_IMG_SELECTOR) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        document
            .select(&selector)
            .filter_map(|img| img.value().attr("src"))
            .filter_map(|src| Url::parse(src).ok())
            .collect()
    }
}

#[async_trait]
impl GalleryScraper for BlinkitScraper {
    async fn fetch_gallery_urls(&self, product_url: &Url) -> AcquireResult<Vec<Url>> {
        let html = fetch_html(&self.client, product_url).await?;
        let urls = Self::parse_gallery(&html);

        if urls.is_empty() {
            return Err(AcquireError::GalleryNotFound {
                url: product_url.to_string(),
            });
        }
        Ok(urls)
    }

    fn name(&self) -> &str {
        "blinkit"
    }
}
