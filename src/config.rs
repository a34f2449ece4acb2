use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::pricing::DEFAULT_MIN_AMOUNT_CENTS;
use crate::core::share::ShareCopy;
use crate::services::CheckoutProduct;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub checkout: CheckoutSettings,
    #[serde(default)]
    pub share: ShareSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Caching is skipped entirely when unset
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Public origin used for success/cancel redirects
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_product_name")]
    pub product_name: String,
    #[serde(default = "default_product_description")]
    pub product_description: String,
    #[serde(default = "default_min_amount_cents")]
    pub min_amount_cents: i64,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            secret_key: None,
            base_url: default_base_url(),
            currency: default_currency(),
            product_name: default_product_name(),
            product_description: default_product_description(),
            min_amount_cents: default_min_amount_cents(),
        }
    }
}

impl CheckoutSettings {
    pub fn product(&self) -> CheckoutProduct {
        CheckoutProduct {
            name: self.product_name.clone(),
            description: self.product_description.clone(),
            currency: self.currency.clone(),
        }
    }
}

fn default_api_base() -> String { "https://api.stripe.com".to_string() }
fn default_base_url() -> String { "http://localhost:3000".to_string() }
fn default_currency() -> String { "usd".to_string() }
fn default_product_name() -> String { "Unlock Your Taylor Swift Connection Path".to_string() }
fn default_product_description() -> String { "Get the full story of how you connect to Taylor Swift".to_string() }
fn default_min_amount_cents() -> i64 { DEFAULT_MIN_AMOUNT_CENTS }

#[derive(Debug, Clone, Deserialize)]
pub struct ShareSettings {
    #[serde(default = "default_celebrity")]
    pub celebrity: String,
    #[serde(default = "default_fan_noun")]
    pub fan_noun: String,
    #[serde(default = "default_site")]
    pub site: String,
    #[serde(default = "default_file_tag")]
    pub file_tag: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            celebrity: default_celebrity(),
            fan_noun: default_fan_noun(),
            site: default_site(),
            file_tag: default_file_tag(),
        }
    }
}

impl From<ShareSettings> for ShareCopy {
    fn from(settings: ShareSettings) -> Self {
        ShareCopy {
            celebrity: settings.celebrity,
            fan_noun: settings.fan_noun,
            site: settings.site,
            file_tag: settings.file_tag,
        }
    }
}

fn default_celebrity() -> String { ShareCopy::default().celebrity }
fn default_fan_noun() -> String { ShareCopy::default().fan_noun }
fn default_site() -> String { ShareCopy::default().site }
fn default_file_tag() -> String { ShareCopy::default().file_tag }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with QUIZ__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., QUIZ__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("QUIZ")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("QUIZ")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables on top of the layered config
///
/// `DATABASE_URL`, `STRIPE_SECRET_KEY` and `BASE_URL` win over file values so
/// the service runs with the same environment as the rest of the stack.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(secret_key) = env::var("STRIPE_SECRET_KEY") {
        builder = builder.set_override("checkout.secret_key", secret_key)?;
    }
    if let Ok(base_url) = env::var("BASE_URL") {
        builder = builder.set_override("checkout.base_url", base_url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_checkout_settings() {
        let checkout = CheckoutSettings::default();
        assert_eq!(checkout.min_amount_cents, 1300);
        assert_eq!(checkout.currency, "usd");
        assert!(checkout.secret_key.is_none());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_share_settings_into_copy() {
        let copy: ShareCopy = ShareSettings::default().into();
        assert_eq!(copy, ShareCopy::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("quiz-config-{}.toml", uuid::Uuid::new_v4().simple()));
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 9090

[database]
url = "postgres://localhost/quiz"

[checkout]
min_amount_cents = 500
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.checkout.min_amount_cents, 500);
        assert_eq!(settings.checkout.currency, "usd");
        assert!(settings.cache.redis_url.is_none());
        assert_eq!(settings.share.celebrity, "Taylor Swift");
    }
}
