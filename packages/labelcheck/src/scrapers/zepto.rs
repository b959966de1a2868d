//! Zepto product-gallery scraper.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::error::{AcquireError, AcquireResult};
use crate::traits::gallery::GalleryScraper;

use super::{fetch_html, gallery_client};

/// Zepto keeps the product slideshow under a stable wrapper id. The same
/// frame can appear more than once in the DOM, so results are deduplicated
/// by URL while keeping first-seen order.
const SLIDER_IMG_SELECTOR: &str = "#slider-wrapper img";

/// Scrapes Zepto product pages for gallery image URLs.
pub struct ZeptoScraper {
    client: reqwest::Client,
}

impl Default for ZeptoScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl ZeptoScraper {
    /// Create a new Zepto scraper.
    pub fn new() -> Self {
        Self {
            client: gallery_client(),
        }
    }

    fn parse_gallery(html: &str) -> Vec<Url> {
        let document = Html::parse_document(html);
        let selector = match Selector::parse(SLIDER_IMG_SELECTOR) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        let mut seen = HashSet::new();
        document
            .select(&selector)
            .filter_map(|img| img.value().attr("src"))
            .filter_map(|src| Url::parse(src).ok())
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }
}

#[async_trait]
impl GalleryScraper for ZeptoScraper {
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
        "zepto"
    }
}
