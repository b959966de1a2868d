//! Table-driven registry of supported grocery sites.
//!
//! Each site carries its high-resolution URL rewrite rules here, so the
//! rewrite is data, not per-call-site logic. Gallery DOM selectors live with
//! the per-site scrapers; this registry only knows hosts and URL grammar.

use url::Url;

/// One query-parameter rewrite applied to a gallery image URL.
#[derive(Debug, Clone, Copy)]
pub enum ParamRewrite {
    /// Replace (or insert) a query parameter with a fixed value.
    Set(&'static str, &'static str),

    /// Remove a query parameter entirely.
    Strip(&'static str),
}

/// A supported grocery site.
#[derive(Debug, Clone, Copy)]
pub struct SiteProfile {
    /// Stable identifier, used in logs.
    pub name: &'static str,

    /// Product-page host suffix used for dispatch.
    pub host_suffix: &'static str,

    /// Rewrite rules turning a gallery thumbnail URL into its
    /// high-resolution form.
    pub hires_rewrites: &'static [ParamRewrite],
}

/// The supported-site table.
///
/// Blinkit's CDN sizes via `w`/`h`/`q` parameters; Zepto's ImageKit CDN
/// honors a quality parameter and serves full size once the transform
/// parameter is stripped.
pub static SITES: &[SiteProfile] = &[
    SiteProfile {
        name: "blinkit",
        host_suffix: "blinkit.com",
        hires_rewrites: &[
            ParamRewrite::Set("w", "1200"),
            ParamRewrite::Set("h", "1200"),
            ParamRewrite::Set("q", "100"),
        ],
    },
    SiteProfile {
        name: "zepto",
        host_suffix: "zeptonow.com",
        hires_rewrites: &[ParamRewrite::Strip("tr"), ParamRewrite::Set("q", "100")],
    },
];

/// Find the profile for a product URL by host suffix.
pub fn find_profile(product_url: &Url) -> Option<&'static SiteProfile> {
    let host = product_url.host_str()?;
    SITES.iter().find(|site| {
        host == site.host_suffix || host.ends_with(&format!(".{}", site.host_suffix))
    })
}

/// Apply a site's rewrite rules to a gallery image URL.
///
/// Parameters not named by any rule pass through untouched, in their
/// original order relative to each other.
pub fn rewrite_hires(image_url: &Url, profile: &SiteProfile) -> Url {
    let mut rewritten = image_url.clone();

    let mut pairs: Vec<(String, String)> = image_url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    for rule in profile.hires_rewrites {
        match rule {
            ParamRewrite::Set(key, value) => {
                if let Some(pair) = pairs.iter_mut().find(|(k, _)| k == key) {
                    pair.1 = (*value).to_string();
                } else {
                    pairs.push(((*key).to_string(), (*value).to_string()));
                }
            }
            ParamRewrite::Strip(key) => {
                pairs.retain(|(k, _)| k != key);
            }
        }
    }

    if pairs.is_empty() {
        rewritten.set_query(None);
    } else {
        rewritten
            .query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    rewritten
}
