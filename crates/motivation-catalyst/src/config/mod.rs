use crate::workflows::assessment::domain::Language;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_APP_ID: &str = "motivation-catalyst-v1";
const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub assessment: AssessmentConfig,
    pub webhook: WebhookConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let app_id = env::var("APP_ID")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_APP_ID.to_string());

        let raw_language = env::var("APP_DEFAULT_LANGUAGE").unwrap_or_else(|_| "he".to_string());
        let default_language = Language::from_code(&raw_language)
            .ok_or(ConfigError::InvalidLanguage(raw_language))?;

        let webhook_url = env::var("APP_WEBHOOK_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let timeout_secs = env::var("APP_WEBHOOK_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_WEBHOOK_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidWebhookTimeout)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            logging: LoggingConfig { log_level },
            assessment: AssessmentConfig {
                app_id,
                default_language,
                catalog_path: path_var("APP_CATALOG_PATH"),
                narrative_path: path_var("APP_NARRATIVE_PATH"),
            },
            webhook: WebhookConfig {
                url: webhook_url,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn path_var(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing subscriber controls.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
}

/// Where the questionnaire content comes from and how events are labelled.
#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    pub app_id: String,
    pub default_language: Language,
    /// JSON question catalog replacing the built-in reference set.
    pub catalog_path: Option<PathBuf>,
    /// JSON narrative table replacing the built-in content.
    pub narrative_path: Option<PathBuf>,
}

/// Outbound submission/interaction webhook.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub timeout: Duration,
}

impl WebhookConfig {
    /// The configured endpoint, unless it is missing or still a deployment placeholder.
    pub fn endpoint(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|url| !url.to_ascii_uppercase().contains("REPLACE"))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLanguage(String),
    InvalidWebhookTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLanguage(value) => write!(
                f,
                "APP_DEFAULT_LANGUAGE must be one of 'he' or 'en' (got '{value}')"
            ),
            ConfigError::InvalidWebhookTimeout => {
                write!(f, "APP_WEBHOOK_TIMEOUT_SECS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLanguage(_)
            | ConfigError::InvalidWebhookTimeout => None,
        }
    }
}
