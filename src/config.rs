use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_contact::{ControllerSettings, EmailConfig};
use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Directory holding `portfolio.json` and `projects.json`
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    #[serde(default = "default_confirmation_ms")]
    pub confirmation_ms: u64,
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,
    /// Shown in failure notifications; falls back to the portfolio's email
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            confirmation_ms: default_confirmation_ms(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
            owner_email: None,
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

impl ContactConfig {
    pub fn settings(&self, fallback_email: Option<String>) -> ControllerSettings {
        ControllerSettings {
            confirmation: Duration::from_millis(self.confirmation_ms),
            delivery_timeout: Duration::from_secs(self.delivery_timeout_secs),
            fallback_email: self.owner_email.clone().or(fallback_email),
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

fn default_confirmation_ms() -> u64 {
    2000
}

fn default_delivery_timeout_secs() -> u64 {
    15
}

fn default_session_ttl_secs() -> u64 {
    30 * 60
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Unprefixed variables kept from the static-site deployment.
const LEGACY_ENV: [(&str, &str); 4] = [
    ("EMAILJS_SERVICE_ID", "email.emailjs.service_id"),
    ("EMAILJS_TEMPLATE_ID", "email.emailjs.template_id"),
    ("EMAILJS_PUBLIC_KEY", "email.emailjs.public_key"),
    ("EMAILJS_PRIVATE_KEY", "email.emailjs.private_key"),
];

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FOLIO__EMAIL__PROVIDER, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in LEGACY_ENV {
            if let Ok(value) = env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.contact.delivery_timeout_secs == 0 {
            return Err("Contact delivery_timeout_secs must be greater than 0".to_string());
        }
        if self.contact.session_ttl_secs == 0 {
            return Err("Contact session_ttl_secs must be greater than 0".to_string());
        }

        self.email.validate()
    }
}
