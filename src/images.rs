//! Dish pictures from an external image search.
//!
//! Lookups never fail from the caller's point of view: any error, or a search
//! without hits, ends in [`PLACEHOLDER_IMAGE`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::error::CookbookError;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300?text=Recipe";
pub const PIXABAY_BASE_URL: &str = "https://pixabay.com/api/";

/// Words appended to a course name when the dish itself has no picture
const COURSE_VARIANTS: [&str; 6] = ["food", "dish", "meal", "cuisine", "recipe", "plated food"];

/// A search service that returns the best matching image for a query
#[async_trait]
pub trait ImageSearch: Send + Sync {
    fn provider_name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Option<String>, CookbookError>;
}

#[derive(Debug, Deserialize)]
struct PixabayResponse {
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Debug, Deserialize)]
struct PixabayHit {
    #[serde(rename = "webformatURL")]
    webformat_url: Option<String>,
}

pub struct PixabayClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PixabayClient {
    /// Create a client, taking the key from the argument or `PIXABAY_API_KEY`
    pub fn new(api_key: Option<String>, timeout: Option<Duration>) -> Result<Self, CookbookError> {
        let api_key = api_key
            .or_else(|| std::env::var("PIXABAY_API_KEY").ok())
            .ok_or_else(|| {
                CookbookError::InvalidInput(
                    "PIXABAY_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(30)))
            .build()?;

        Ok(PixabayClient {
            client,
            api_key,
            base_url: PIXABAY_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ImageSearch for PixabayClient {
    fn provider_name(&self) -> &str {
        "pixabay"
    }

    async fn search(&self, query: &str) -> Result<Option<String>, CookbookError> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        let response: PixabayResponse = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("image_type", "photo"),
                ("safesearch", "true"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("Image search for {:?} returned {} hits", query, response.hits.len());
        Ok(response
            .hits
            .into_iter()
            .next()
            .and_then(|hit| hit.webformat_url))
    }
}

/// Picks a picture for a dish: by name, then by course, then the placeholder.
#[derive(Clone)]
pub struct DishImageResolver {
    search: Arc<dyn ImageSearch>,
}

impl DishImageResolver {
    pub fn new(search: Arc<dyn ImageSearch>) -> Self {
        DishImageResolver { search }
    }

    async fn try_search(&self, query: &str) -> Option<String> {
        match self.search.search(query).await {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    "{} image search for {:?} failed: {}",
                    self.search.provider_name(),
                    query,
                    e
                );
                None
            }
        }
    }

    pub async fn resolve(&self, name: &str, course: Option<&str>) -> String {
        if let Some(url) = self.try_search(name).await {
            return url;
        }

        if let Some(course) = course.filter(|c| !c.trim().is_empty()) {
            let query = course_query(course);
            if let Some(url) = self.try_search(&query).await {
                return url;
            }
        }

        PLACEHOLDER_IMAGE.to_string()
    }

    /// Start a lookup in the background. Dropping the returned handle
    /// abandons it.
    pub fn spawn(&self, name: impl Into<String>, course: Option<String>) -> ImageLookup {
        let resolver = self.clone();
        let name = name.into();
        let handle =
            tokio::spawn(async move { resolver.resolve(&name, course.as_deref()).await });
        ImageLookup { handle }
    }
}

fn course_query(course: &str) -> String {
    let variant = COURSE_VARIANTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("food");
    format!("{} {}", course.trim(), variant)
}

/// An in-flight image lookup owned by one displayed item
pub struct ImageLookup {
    handle: JoinHandle<String>,
}

impl ImageLookup {
    /// Wait for the image URL; a cancelled or panicked lookup yields the placeholder
    pub async fn wait(mut self) -> String {
        match (&mut self.handle).await {
            Ok(url) => url,
            Err(e) => {
                debug!("Image lookup ended early: {}", e);
                PLACEHOLDER_IMAGE.to_string()
            }
        }
    }

    /// Stop the lookup; its result will never be delivered
    pub fn abandon(self) {}

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ImageLookup {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Answers from a fixed table and records every query
    struct StaticSearch {
        answers: Vec<(&'static str, &'static str)>,
        fail: bool,
        queries: Mutex<Vec<String>>,
    }

    impl StaticSearch {
        fn new(answers: Vec<(&'static str, &'static str)>) -> Self {
            StaticSearch {
                answers,
                fail: false,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageSearch for StaticSearch {
        fn provider_name(&self) -> &str {
            "static"
        }

        async fn search(&self, query: &str) -> Result<Option<String>, CookbookError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(CookbookError::InvalidInput("boom".to_string()));
            }
            Ok(self
                .answers
                .iter()
                .find(|(prefix, _)| query.starts_with(prefix))
                .map(|(_, url)| url.to_string()))
        }
    }

    #[tokio::test]
    async fn test_name_match_wins() {
        let search = Arc::new(StaticSearch::new(vec![("Kheer", "https://img/kheer.jpg")]));
        let resolver = DishImageResolver::new(search.clone());

        let url = resolver.resolve("Kheer", Some("dessert")).await;
        assert_eq!(url, "https://img/kheer.jpg");
        assert_eq!(search.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_course_fallback_uses_a_variant() {
        let search = Arc::new(StaticSearch::new(vec![("dessert ", "https://img/dessert.jpg")]));
        let resolver = DishImageResolver::new(search.clone());

        let url = resolver.resolve("Obscure Dish", Some("dessert")).await;
        assert_eq!(url, "https://img/dessert.jpg");

        let queries = search.queries.lock().unwrap();
        let variant = queries[1].strip_prefix("dessert ").unwrap();
        assert!(COURSE_VARIANTS.contains(&variant));
    }

    #[tokio::test]
    async fn test_failures_end_in_placeholder() {
        let mut search = StaticSearch::new(Vec::new());
        search.fail = true;
        let resolver = DishImageResolver::new(Arc::new(search));

        assert_eq!(resolver.resolve("Kheer", Some("dessert")).await, PLACEHOLDER_IMAGE);
    }

    #[tokio::test]
    async fn test_no_course_skips_fallback() {
        let search = Arc::new(StaticSearch::new(Vec::new()));
        let resolver = DishImageResolver::new(search.clone());

        assert_eq!(resolver.resolve("Kheer", None).await, PLACEHOLDER_IMAGE);
        assert_eq!(search.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_spawned_lookup_delivers() {
        let search = Arc::new(StaticSearch::new(vec![("Poha", "https://img/poha.jpg")]));
        let resolver = DishImageResolver::new(search);

        let lookup = resolver.spawn("Poha", None);
        assert_eq!(lookup.wait().await, "https://img/poha.jpg");
    }

    #[test]
    fn test_pixabay_response_shape() {
        let response: PixabayResponse = serde_json::from_str(
            r#"{"total": 1, "hits": [{"id": 7, "webformatURL": "https://cdn/x_640.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.hits[0].webformat_url.as_deref(),
            Some("https://cdn/x_640.jpg")
        );
    }
}
