//! Image acquisition: product URL or local path → decoded images.
//!
//! Per-image fetch/decode failures are logged and dropped; zero acquired
//! images is a valid (if useless) result at this layer. The caller decides
//! whether an empty set is fatal.

pub mod sites;

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};
use url::Url;

use crate::error::{AcquireError, AcquireResult};
use crate::traits::gallery::GalleryScraper;
use crate::types::image::ProductImage;

pub use sites::{find_profile, rewrite_hires, ParamRewrite, SiteProfile, SITES};

/// Where the product photographs come from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A grocery-site product page.
    Url(String),

    /// A user-supplied image file on disk.
    LocalPath(PathBuf),
}

impl ImageSource {
    /// Human-readable description for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::LocalPath(path) => path.display().to_string(),
        }
    }
}

/// Fetches and decodes gallery images over HTTP.
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    /// Create a fetcher with the given per-request timeout.
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch one image URL and decode it.
    pub async fn fetch_image(&self, url: &Url) -> AcquireResult<ProductImage> {
        debug!(url = %url, "fetching gallery image");
        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            if e.is_timeout() {
                AcquireError::Timeout {
                    url: url.to_string(),
                }
            } else {
                AcquireError::Http(Box::new(e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquireError::Http(
                format!("HTTP {} for {}", status, url).into(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AcquireError::Http(Box::new(e)))?;

        ProductImage::from_bytes(url.to_string(), bytes.to_vec()).map_err(|reason| {
            AcquireError::Decode {
                url: url.to_string(),
                reason,
            }
        })
    }
}

/// Acquire product images from a source.
///
/// URL sources: the gallery scraper yields raw image URLs, each rewritten to
/// its high-resolution form per the site registry, then fetched and decoded.
/// Local-path sources: the file is read and decoded as a single image.
pub async fn acquire(
    source: &ImageSource,
    scraper: &dyn GalleryScraper,
    fetcher: &ImageFetcher,
    max_images: usize,
) -> AcquireResult<Vec<ProductImage>> {
    match source {
        ImageSource::Url(raw) => {
            let product_url = Url::parse(raw).map_err(|_| AcquireError::InvalidUrl {
                url: raw.clone(),
            })?;

            let profile =
                find_profile(&product_url).ok_or_else(|| AcquireError::UnsupportedSite {
                    host: product_url.host_str().unwrap_or("").to_string(),
                })?;

            let gallery_urls = scraper.fetch_gallery_urls(&product_url).await?;
            debug!(
                site = profile.name,
                count = gallery_urls.len(),
                "gallery URLs discovered"
            );

            // Fetch the capped set concurrently; join_all keeps gallery order.
            let fetches = gallery_urls.iter().take(max_images).map(|image_url| {
                let hires = rewrite_hires(image_url, profile);
                async move {
                    match fetcher.fetch_image(&hires).await {
                        Ok(image) => Some(image),
                        Err(e) => {
                            // Degraded, not fatal: drop this image, keep the rest.
                            warn!(url = %hires, error = %e, "dropping gallery image");
                            None
                        }
                    }
                }
            });

            Ok(join_all(fetches).await.into_iter().flatten().collect())
        }
        ImageSource::LocalPath(path) => acquire_local(path).map(|img| vec![img]),
    }
}

fn acquire_local(path: &Path) -> AcquireResult<ProductImage> {
    let data = std::fs::read(path).map_err(|source| AcquireError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    ProductImage::from_bytes(path.display().to_string(), data).map_err(|reason| {
        AcquireError::Decode {
            url: path.display().to_string(),
            reason,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::gallery::MockGalleryScraper;

    #[tokio::test]
    async fn test_unsupported_site_is_an_error() {
        let scraper = MockGalleryScraper::new();
        let fetcher = ImageFetcher::new(5);
        let source = ImageSource::Url("https://groceries.example.com/item/1".to_string());

        let err = acquire(&source, &scraper, &fetcher, 10).await.unwrap_err();
        assert!(matches!(err, AcquireError::UnsupportedSite { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let scraper = MockGalleryScraper::new();
        let fetcher = ImageFetcher::new(5);
        let source = ImageSource::Url("not a url".to_string());

        let err = acquire(&source, &scraper, &fetcher, 10).await.unwrap_err();
        assert!(matches!(err, AcquireError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_empty_gallery_is_not_an_error_here() {
        // Zero acquired images is valid at this layer; the pipeline decides.
        let scraper = MockGalleryScraper::new()
            .with_gallery("https://blinkit.com/prn/ketchup/prid/436913", &[]);
        let fetcher = ImageFetcher::new(5);
        let source = ImageSource::Url("https://blinkit.com/prn/ketchup/prid/436913".to_string());

        let images = acquire(&source, &scraper, &fetcher, 10).await.unwrap();
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_gallery_images_drop_without_aborting() {
        // Both fetches fail fast with connection refused; the batch still
        // completes and yields an empty set instead of an error.
        let scraper = MockGalleryScraper::new().with_gallery(
            "https://blinkit.com/prn/ketchup/prid/436913",
            &[
                "http://127.0.0.1:1/a.jpg?w=480",
                "http://127.0.0.1:1/b.jpg?w=480",
            ],
        );
        let fetcher = ImageFetcher::new(5);
        let source = ImageSource::Url("https://blinkit.com/prn/ketchup/prid/436913".to_string());

        let images = acquire(&source, &scraper, &fetcher, 10).await.unwrap();
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_local_path_missing_file() {
        let scraper = MockGalleryScraper::new();
        let fetcher = ImageFetcher::new(5);
        let source = ImageSource::LocalPath(PathBuf::from("/nonexistent/image.png"));

        let err = acquire(&source, &scraper, &fetcher, 10).await.unwrap_err();
        assert!(matches!(err, AcquireError::FileRead { .. }));
    }

    #[tokio::test]
    async fn test_local_path_decodes_one_image() {
        let img = image::DynamicImage::new_rgb8(2, 2);
        let dir = std::env::temp_dir().join("labelcheck-acquire-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("label.png");
        img.save(&path).unwrap();

        let scraper = MockGalleryScraper::new();
        let fetcher = ImageFetcher::new(5);
        let source = ImageSource::LocalPath(path.clone());

        let images = acquire(&source, &scraper, &fetcher, 10).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].dimensions(), (2, 2));

        std::fs::remove_file(path).ok();
    }
}
