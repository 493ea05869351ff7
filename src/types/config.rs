//! Configuration structures.
//!
//! Configuration is loaded from environment variables on top of defaults;
//! CLI flags override individual fields.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Values shipped in the example env file. They count as "not configured".
const PLACEHOLDER_URL: &str = "your_supabase_project_url";
const PLACEHOLDER_KEY: &str = "your_supabase_anon_key";

/// Global catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Remote catalog source.
    #[serde(default)]
    pub source: SourceConfig,

    /// Site-wide presentation settings.
    #[serde(default)]
    pub site: SiteConfig,
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(addr) = get("CATALOG_LISTEN_ADDR") {
            config.server.listen_addr = addr;
        }
        if let Some(format) = get("CATALOG_LOG_FORMAT") {
            config.observability.json_logs = format.eq_ignore_ascii_case("json");
        }
        config.source.url = get("SUPABASE_URL");
        config.source.anon_key = get("SUPABASE_ANON_KEY");
        if let Some(table) = get("CATALOG_TABLE") {
            config.source.table = table;
        }
        if let Some(origin) = get("SITE_ORIGIN") {
            config.site.origin = origin;
        }
        config.site.utm_source = get("CATALOG_UTM_SOURCE");

        config
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP bind address.
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Remote catalog (PostgREST) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,

    /// Anonymous API key sent as `apikey` and bearer token.
    pub anon_key: Option<String>,

    /// Table holding the tool rows.
    pub table: String,

    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl SourceConfig {
    /// URL and key, if both are set to something other than the placeholders.
    pub fn remote_credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref()?.trim();
        let key = self.anon_key.as_deref()?.trim();
        if url.is_empty() || key.is_empty() || url == PLACEHOLDER_URL || key == PLACEHOLDER_KEY {
            return None;
        }
        Some((url, key))
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            table: "tools".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Site presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Heading shown on every page.
    pub name: String,

    /// Sub-heading on the home page.
    pub tagline: String,

    /// Public origin used for sitemap `<loc>` entries.
    pub origin: String,

    /// When set, outbound affiliate links get UTM parameters with this source.
    pub utm_source: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "AI Affiliate Tools".to_string(),
            tagline: "Discover the best AI tools for your needs".to_string(),
            origin: "http://localhost:3000".to_string(),
            utm_source: None,
        }
    }
}
