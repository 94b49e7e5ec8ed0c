//! Offline cache manifest for the installable web front end.
//!
//! Core assets are cached under a versioned name. Bumping the version
//! invalidates every older cache wholesale.

pub const CACHE_PREFIX: &str = "thenu-cookbook-";
pub const NAVIGATION_FALLBACK: &str = "/index.html";

pub const CORE_ASSETS: [&str; 6] = [
    "/",
    "/index.html",
    "/manifest.json",
    "/favicon.ico",
    "/logo192.png",
    "/logo512.png",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheManifest {
    version: String,
}

impl Default for CacheManifest {
    fn default() -> Self {
        CacheManifest::new("v1")
    }
}

impl CacheManifest {
    pub fn new(version: impl Into<String>) -> Self {
        CacheManifest {
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn cache_name(&self) -> String {
        format!("{}{}", CACHE_PREFIX, self.version)
    }

    pub fn core_assets(&self) -> &'static [&'static str] {
        &CORE_ASSETS
    }

    /// Caches this app owns that belong to another version
    pub fn stale_caches<'a>(&self, existing: &[&'a str]) -> Vec<&'a str> {
        let current = self.cache_name();
        existing
            .iter()
            .copied()
            .filter(|name| name.starts_with(CACHE_PREFIX) && *name != current)
            .collect()
    }
}

/// How a GET request is answered while offline support is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Try the network, refresh the cached shell, fall back to it when offline
    NetworkFirst { fallback: &'static str },
    /// Serve from cache, fetch and store on a miss
    CacheFirst,
}

impl FetchStrategy {
    /// `None` means the request is left alone
    pub fn for_request(method: &str, is_navigation: bool, same_origin: bool) -> Option<Self> {
        if !method.eq_ignore_ascii_case("GET") {
            return None;
        }
        if is_navigation {
            return Some(FetchStrategy::NetworkFirst {
                fallback: NAVIGATION_FALLBACK,
            });
        }
        same_origin.then_some(FetchStrategy::CacheFirst)
    }
}

/// Only complete same-origin responses are worth caching
pub fn should_store(status: u16, same_origin: bool) -> bool {
    status == 200 && same_origin
}
