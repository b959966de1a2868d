//! Gallery scraper implementations.
//!
//! Static-HTML scrapers built on `reqwest` + `scraper` CSS selectors:
//! - `BlinkitScraper` - Blinkit product carousel
//! - `ZeptoScraper` - Zepto product slideshow
//! - `SiteRouter` - dispatches to the right scraper via the site registry
//!
//! These do not render JavaScript; pages that hydrate their gallery
//! client-side only will report `GalleryNotFound`.

pub mod blinkit;
pub mod zepto;

pub use blinkit::BlinkitScraper;
pub use zepto::ZeptoScraper;

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::acquire::sites::find_profile;
use crate::error::{AcquireError, AcquireResult};
use crate::traits::gallery::GalleryScraper;

/// Shared HTTP client settings for gallery page fetches.
///
/// Browser-like headers: both sites serve different markup to obvious bots.
pub(crate) fn gallery_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .unwrap_or_default()
}

/// Fetch a product page's HTML.
pub(crate) async fn fetch_html(client: &reqwest::Client, url: &Url) -> AcquireResult<String> {
    debug!(url = %url, "fetching product page");
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| AcquireError::Http(Box::new(e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AcquireError::Http(
            format!("HTTP {} for {}", status, url).into(),
        ));
    }

    response
        .text()
        .await
        .map_err(|e| AcquireError::Http(Box::new(e)))
}

/// Routes product URLs to the matching site scraper.
///
/// The pipeline holds one `GalleryScraper`; this is the default production
/// implementation covering every site in the registry.
pub struct SiteRouter {
    blinkit: BlinkitScraper,
    zepto: ZeptoScraper,
}

impl Default for SiteRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteRouter {
    /// Create a router over all supported sites.
    pub fn new() -> Self {
        Self {
            blinkit: BlinkitScraper::new(),
            zepto: ZeptoScraper::new(),
        }
    }
}

#[async_trait]
impl GalleryScraper for SiteRouter {
    async fn fetch_gallery_urls(&self, product_url: &Url) -> AcquireResult<Vec<Url>> {
        let profile = find_profile(product_url).ok_or_else(|| AcquireError::UnsupportedSite {
            host: product_url.host_str().unwrap_or("").to_string(),
        })?;

        match profile.name {
            "blinkit" => self.blinkit.fetch_gallery_urls(product_url).await,
            "zepto" => self.zepto.fetch_gallery_urls(product_url).await,
            other => Err(AcquireError::UnsupportedSite {
                host: other.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "site-router"
    }
}
