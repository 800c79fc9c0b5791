use url::Url;

/// Environment variable naming the key directory base URL.
const KEY_SERVICE_URL_ENV: &str = "KEY_SERVICE_URL";
/// Environment variable naming the routing relay base URL.
const ROUTING_SERVICE_URL_ENV: &str = "ROUTING_SERVICE_URL";
/// Project id for the hosted document-store backend, when one is wired in.
const PROJECT_ID_ENV: &str = "GCP_PROJECT_ID";
const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the public-key directory service.
    pub key_service_url: Url,
    /// Base URL of the routing relay service.
    pub routing_service_url: Url,
    /// Cloud project for persistent storage adapters; unset means the
    ///  in-memory stores are used.
    pub project_id: Option<String>,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_service_url: Url::parse("http://localhost:8081").expect("static url"),
            routing_service_url: Url::parse("http://localhost:8080").expect("static url"),
            project_id: None,
            log_level: tracing::Level::INFO,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {0}: {1}")]
    InvalidUrl(&'static str, url::ParseError),
    #[error("invalid {0}: {1}")]
    InvalidLogLevel(&'static str, String),
}

impl Config {
    /// Defaults overlaid with whatever the environment provides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(KEY_SERVICE_URL_ENV) {
            config.key_service_url = Url::parse(&raw)
                .map_err(|e| ConfigError::InvalidUrl(KEY_SERVICE_URL_ENV, e))?;
        }
        if let Ok(raw) = std::env::var(ROUTING_SERVICE_URL_ENV) {
            config.routing_service_url = Url::parse(&raw)
                .map_err(|e| ConfigError::InvalidUrl(ROUTING_SERVICE_URL_ENV, e))?;
        }
        if let Ok(raw) = std::env::var(PROJECT_ID_ENV) {
            if !raw.is_empty() {
                config.project_id = Some(raw);
            }
        }
        if let Ok(raw) = std::env::var(LOG_LEVEL_ENV) {
            config.log_level = raw
                .parse()
                .map_err(|_| ConfigError::InvalidLogLevel(LOG_LEVEL_ENV, raw))?;
        }

        Ok(config)
    }
}
