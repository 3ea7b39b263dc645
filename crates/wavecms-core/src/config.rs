//! Site configuration
//!
//! Configuration is loaded from:
//! 1. Default values (the stock Wave Liberia site)
//! 2. Config file (~/.config/wavecms/config.toml)
//! 3. Environment variables (WAVECMS_* prefix)
//!
//! Environment variables take precedence over config file values.
//! Configuration is immutable for the lifetime of the process; there is
//! no reload mechanism.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{Category, SocialLinks};

/// Environment variable prefix
const ENV_PREFIX: &str = "WAVECMS";

/// Site configuration
///
/// Static values consumed by the store (seed content) and the renderer
/// (site identity, category catalog).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Site display name
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Site tagline, used as the default meta description
    #[serde(default = "default_site_description")]
    pub site_description: String,

    /// Canonical site URL
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Directory for the persisted site document
    ///
    /// Kept ahead of the nested sections so the TOML serializer emits
    /// it before the first table header.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Dashboard admin credentials (stored in plaintext, as the
    /// dashboard expects)
    #[serde(default)]
    pub admin: AdminCredentials,

    /// Social media links keyed by platform
    #[serde(default = "default_social")]
    pub social: SocialLinks,

    /// Contact details shown in the site footer
    #[serde(default)]
    pub contact: ContactInfo,

    /// The category catalog
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

/// Dashboard admin credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "waveliberia2023".to_string(),
        }
    }
}

/// Contact details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: "info@waveliberia.com".to_string(),
            phone: "+231 880 123 4567".to_string(),
            address: "Media Plaza, Monrovia, Liberia".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            site_description: default_site_description(),
            site_url: default_site_url(),
            admin: AdminCredentials::default(),
            social: default_social(),
            contact: ContactInfo::default(),
            categories: default_categories(),
            data_dir: default_data_dir(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (WAVECMS_DATA_DIR, WAVECMS_SITE_NAME, ...)
    /// 2. Config file (~/.config/wavecms/config.toml or WAVECMS_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: SiteConfig =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var(format!("{}_SITE_NAME", ENV_PREFIX)) {
            self.site_name = val;
        }
        if let Ok(val) = std::env::var(format!("{}_SITE_URL", ENV_PREFIX)) {
            self.site_url = val;
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with the WAVECMS_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wavecms")
            .join("config.toml")
    }

    /// Get the path to the persisted site document
    pub fn site_data_path(&self) -> PathBuf {
        self.data_dir.join("site.json")
    }

    /// Look up a category by id
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display name for a category id, if known
    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.category(id).map(|c| c.name.as_str())
    }

    /// Description for a category id, if known
    pub fn category_description(&self, id: &str) -> Option<&str> {
        self.category(id).map(|c| c.description.as_str())
    }
}

fn default_site_name() -> String {
    "Wave Liberia".to_string()
}

fn default_site_description() -> String {
    "Liberia's Premier News & Entertainment Hub".to_string()
}

fn default_site_url() -> String {
    "https://waveliberia.com".to_string()
}

fn default_social() -> SocialLinks {
    [
        ("facebook", "https://facebook.com/waveliberia"),
        ("twitter", "https://twitter.com/waveliberia"),
        ("instagram", "https://instagram.com/waveliberia"),
        ("youtube", "https://youtube.com/waveliberia"),
        ("tiktok", "https://tiktok.com/@waveliberia"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// The stock six-category catalog
fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "news",
            "News",
            "#002868",
            "Latest news and current events from Liberia and around the world",
        ),
        Category::new(
            "entertainment",
            "Entertainment",
            "#BF0A30",
            "Music, movies, celebrities, and entertainment news",
        ),
        Category::new(
            "sports",
            "Sports",
            "#0a66c2",
            "Sports news, matches, and athlete updates",
        ),
        Category::new(
            "technology",
            "Technology",
            "#3B82F6",
            "Tech news, innovations, and digital trends",
        ),
        Category::new(
            "education",
            "Education",
            "#10B981",
            "Educational news, scholarships, and learning resources",
        ),
        Category::new(
            "lifestyle",
            "Lifestyle",
            "#7c3aed",
            "Fashion, health, travel, and lifestyle content",
        ),
    ]
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wavecms")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "WAVECMS_DATA_DIR",
        "WAVECMS_SITE_NAME",
        "WAVECMS_SITE_URL",
    ];

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.site_name, "Wave Liberia");
        assert_eq!(config.categories.len(), 6);
        assert_eq!(config.social.len(), 5);
        assert!(config.data_dir.ends_with("wavecms"));
    }

    #[test]
    fn test_site_data_path() {
        let config = SiteConfig::default();
        assert!(config.site_data_path().ends_with("site.json"));
    }

    #[test]
    fn test_category_lookup() {
        let config = SiteConfig::default();

        let sports = config.category("sports").unwrap();
        assert_eq!(sports.name, "Sports");
        assert_eq!(sports.color, "#0a66c2");

        assert_eq!(config.category_name("entertainment"), Some("Entertainment"));
        assert!(config
            .category_description("lifestyle")
            .unwrap()
            .contains("Fashion"));

        assert!(config.category("politics").is_none());
        assert!(config.category_name("politics").is_none());
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = SiteConfig::default();

        env::set_var("WAVECMS_DATA_DIR", "/tmp/wavecms-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/wavecms-test"));
    }

    #[test]
    fn test_env_override_site_name() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = SiteConfig::default();

        env::set_var("WAVECMS_SITE_NAME", "Test Wave");
        config.apply_env_overrides();

        assert_eq!(config.site_name, "Test Wave");
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            site_name = "Custom Site"
            data_dir = "/custom/data"
        "#;

        let config = SiteConfig::load_from_str(toml).unwrap();
        assert_eq!(config.site_name, "Custom Site");
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        // Omitted sections fall back to defaults
        assert_eq!(config.categories.len(), 6);
        assert_eq!(config.admin.username, "admin");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("WAVECMS_DATA_DIR", temp_dir.path().join("data"));

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = SiteConfig::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert_eq!(config.site_name, "Wave Liberia");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = SiteConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("site_name"));
        assert!(toml_str.contains("data_dir"));

        let parsed: SiteConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
