use crate::core::catalog::Catalog;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";

fn default_gemini_url() -> String {
    DEFAULT_GEMINI_URL.to_string()
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeminiProviderConfig {
    #[serde(default = "default_gemini_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Falls back to `GEMINI_API_KEY`, then `API_KEY`, when unset.
    pub api_key: Option<String>,
    /// No timeout is applied unless set.
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub retries: usize,
}

impl Default for GeminiProviderConfig {
    fn default() -> Self {
        GeminiProviderConfig {
            base_url: default_gemini_url(),
            model: default_gemini_model(),
            api_key: None,
            timeout_secs: None,
            retries: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub gemini: GeminiProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(flatten)]
    pub catalog: Catalog,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "ecsa", "ecsa")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.catalog.validate().with_context(|| {
            format!("Invalid catalog in config file: {}", path.as_ref().display())
        })?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
platforms:
  - id: amazon
    name: Amazon
    commission_rate: 0.15
    tax_rate: 0.08
  - id: etsy
    name: Etsy
    commission_rate: 0.065
    tax_rate: 0.08
products:
  - id: p1
    name: Wireless Headphones
    capital: 45
    price: 99.99
    units_sold: 120
    competitor_prices: [95, 105, 98]
    ads_budget: 500
    seo_score: 85
    rating: 4.8
  - id: p2
    name: Gift Card
    capital: 0
    price: 25
    units_sold: 10
    ads_budget: 0
    seo_score: 50
    rating: 4
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.catalog.platforms.len(), 2);
        assert_eq!(config.catalog.platforms[1].id, "etsy");
        assert_eq!(config.catalog.platforms[1].commission_rate, 0.065);
        assert_eq!(config.catalog.products.len(), 2);
        assert_eq!(config.catalog.products[0].competitor_prices, vec![95.0, 105.0, 98.0]);
        assert!(config.catalog.products[1].competitor_prices.is_empty());

        let gemini = &config.providers.gemini;
        assert_eq!(gemini.base_url, DEFAULT_GEMINI_URL);
        assert_eq!(gemini.model, DEFAULT_GEMINI_MODEL);
        assert!(gemini.api_key.is_none());
        assert!(gemini.timeout_secs.is_none());
        assert_eq!(gemini.retries, 0);

        let yaml_str_with_providers = r#"
platforms:
  - id: shopify
    name: Shopify
    commission_rate: 0.029
    tax_rate: 0.08
providers:
  gemini:
    base_url: "http://localhost:9999"
    model: gemini-2.5-flash
    api_key: secret
    timeout_secs: 30
    retries: 2
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str_with_providers).unwrap();
        assert!(config.catalog.products.is_empty());
        let gemini = &config.providers.gemini;
        assert_eq!(gemini.base_url, "http://localhost:9999");
        assert_eq!(gemini.model, "gemini-2.5-flash");
        assert_eq!(gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(gemini.timeout_secs, Some(30));
        assert_eq!(gemini.retries, 2);
    }

    #[test]
    fn test_load_rejects_invalid_catalog() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
platforms:
  - id: broken
    name: Broken
    commission_rate: 1.5
    tax_rate: 0.08
"#
        )
        .unwrap();

        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid catalog"));
        assert!(format!("{err:#}").contains("commission_rate"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load_from_path("/nonexistent/ecsa/config.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
