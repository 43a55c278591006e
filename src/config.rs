use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Settings for the USDA FoodData Central client and its search cache.
#[derive(Debug, Clone, Deserialize)]
pub struct UsdaConfig {
    pub api_key: String,
    pub base_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.nal.usda.gov/fdc/v1".into(),
            page_size: 25,
            timeout_secs: 10,
            cache_ttl_secs: 3600,
            cache_max_entries: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub usda: UsdaConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "mealmind".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "mealmind-users".into()),
            ttl_minutes: env_or("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_or("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };

        let defaults = UsdaConfig::default();
        let usda = UsdaConfig {
            api_key: std::env::var("USDA_API_KEY").context("USDA_API_KEY is not set")?,
            base_url: std::env::var("USDA_BASE_URL").unwrap_or(defaults.base_url),
            page_size: env_or("USDA_PAGE_SIZE", defaults.page_size),
            timeout_secs: env_or("USDA_TIMEOUT_SECS", defaults.timeout_secs),
            cache_ttl_secs: env_or("USDA_CACHE_TTL_SECS", defaults.cache_ttl_secs),
            cache_max_entries: env_or("USDA_CACHE_MAX_ENTRIES", defaults.cache_max_entries),
        };

        Ok(Self {
            database_url,
            jwt,
            usda,
        })
    }
}
