//! Tracking policy: which URLs and which view kinds are eligible for events.

use std::sync::OnceLock;

use url::Url;

use crate::config::EngineConfig;
use crate::types::ViewKind;

pub const ABOUT_BLANK: &str = "about:blank";
pub const ABOUT_SRCDOC: &str = "about:srcdoc";
pub const EXTENSION_SCHEME: &str = "chrome-extension";

const VALID_SCHEMES: [&str; 7] = [
    "http",
    "https",
    "file",
    "ftp",
    "javascript",
    "data",
    "filesystem",
];

/// URL that srcdoc iframes are reported under.
pub fn about_srcdoc() -> &'static Url {
    static SRCDOC: OnceLock<Url> = OnceLock::new();
    SRCDOC.get_or_init(|| Url::parse(ABOUT_SRCDOC).expect("about:srcdoc is a valid URL"))
}

/// Shared, immutable eligibility rules for every observer of one engine.
#[derive(Debug, Clone)]
pub struct TrackingPolicy {
    allow_extension_scheme: bool,
    extra_schemes: Vec<String>,
    trackable_views: Vec<ViewKind>,
}

impl Default for TrackingPolicy {
    fn default() -> Self {
        Self {
            allow_extension_scheme: false,
            extra_schemes: Vec::new(),
            trackable_views: vec![ViewKind::TabContents],
        }
    }
}

impl TrackingPolicy {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            allow_extension_scheme: config.allow_extension_scheme,
            extra_schemes: config
                .extra_schemes
                .iter()
                .map(|scheme| scheme.to_ascii_lowercase())
                .collect(),
            trackable_views: config.trackable_views.clone(),
        }
    }

    /// Whether `url` may ever be surfaced to subscribers.
    pub fn is_valid_url(&self, url: &Url) -> bool {
        let scheme = url.scheme();
        if VALID_SCHEMES.contains(&scheme) {
            return true;
        }
        if url.as_str() == ABOUT_BLANK || url.as_str() == ABOUT_SRCDOC {
            return true;
        }
        if self.allow_extension_scheme && scheme == EXTENSION_SCHEME {
            return true;
        }
        self.extra_schemes.iter().any(|extra| extra == scheme)
    }

    pub fn is_trackable_view(&self, kind: ViewKind) -> bool {
        self.trackable_views.contains(&kind)
    }
}

/// True iff the URLs differ but are equal once their fragments are dropped.
pub fn is_reference_fragment_navigation(existing: &Url, url: &Url) -> bool {
    if existing == url {
        return false;
    }
    let mut existing = existing.clone();
    let mut url = url.clone();
    existing.set_fragment(None);
    url.set_fragment(None);
    existing == url
}

/// Whether a load-finished URL still refers to the tracked navigation.
///
/// srcdoc iframes are tracked as `about:srcdoc` but finish loading as `about:blank`.
pub fn load_url_matches(tracked: &Url, reported: &Url) -> bool {
    tracked == reported || (tracked.as_str() == ABOUT_SRCDOC && reported.as_str() == ABOUT_BLANK)
}
