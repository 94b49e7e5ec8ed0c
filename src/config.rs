use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::images::PIXABAY_BASE_URL;
use crate::pagination::PageSize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct CookbookConfig {
    /// Backend endpoint that filters recipes by ingredients
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Results shown per page (5, 10, 20 or 50)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Where the session file lives; defaults to the platform data directory
    #[serde(default)]
    pub session_dir: Option<PathBuf>,
    /// Image search configuration
    #[serde(default)]
    pub images: ImagesConfig,
    /// Offline cache configuration
    #[serde(default)]
    pub offline: OfflineConfig,
}

/// Configuration for the image search service
#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    /// API key (can also be set via PIXABAY_API_KEY)
    pub api_key: Option<String>,
    #[serde(default = "default_images_base_url")]
    pub base_url: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_images_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OfflineConfig {
    /// Cache version; changing it invalidates every cached asset
    #[serde(default = "default_cache_version")]
    pub version: String,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            version: default_cache_version(),
        }
    }
}

impl Default for CookbookConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout: default_timeout(),
            page_size: default_page_size(),
            session_dir: None,
            images: ImagesConfig::default(),
            offline: OfflineConfig::default(),
        }
    }
}

// Default value functions
fn default_backend_url() -> String {
    "http://localhost:5000/api/dashboard".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> usize {
    PageSize::default().get()
}

fn default_images_base_url() -> String {
    PIXABAY_BASE_URL.to_string()
}

fn default_cache_version() -> String {
    "v1".to_string()
}

impl CookbookConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COOKBOOK__ prefix
    /// 2. cookbook.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COOKBOOK__IMAGES__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Configured page size, falling back to the default when it is not an
    /// allowed value
    pub fn page_size(&self) -> PageSize {
        PageSize::try_from(self.page_size).unwrap_or_default()
    }

    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(|| {
            ProjectDirs::from("", "", "thenu-cookbook")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".thenu-cookbook"))
        })
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<CookbookConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("cookbook").required(false))
        // Use double underscore for nested: COOKBOOK__IMAGES__API_KEY
        .add_source(
            Environment::with_prefix("COOKBOOK")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_backend_url(), "http://localhost:5000/api/dashboard");
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_page_size(), 5);
        assert_eq!(default_cache_version(), "v1");
    }

    #[test]
    fn test_invalid_page_size_falls_back() {
        let config = CookbookConfig {
            page_size: 7,
            ..Default::default()
        };
        assert_eq!(config.page_size(), PageSize::Five);

        let config = CookbookConfig {
            page_size: 20,
            ..Default::default()
        };
        assert_eq!(config.page_size(), PageSize::Twenty);
    }

    #[test]
    fn test_explicit_session_dir_wins() {
        let config = CookbookConfig {
            session_dir: Some(PathBuf::from("/tmp/cookbook-session")),
            ..Default::default()
        };
        assert_eq!(config.session_dir(), PathBuf::from("/tmp/cookbook-session"));
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: CookbookConfig = Config::builder()
            .add_source(File::from_str(
                "backend_url = \"http://example.test/filter\"\n[images]\napi_key = \"abc\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.backend_url, "http://example.test/filter");
        assert_eq!(config.images.api_key.as_deref(), Some("abc"));
        assert_eq!(config.images.base_url, PIXABAY_BASE_URL);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.offline.version, "v1");
    }
}
