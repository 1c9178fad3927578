use std::path::PathBuf;

use marquee_core::application::CatalogSettings;

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub security: SecurityConfig,
    pub catalog: CatalogConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Required to serve; `None` only lets config-level tooling run.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Honour `X-Forwarded-For` when resolving the client identity.
    pub trust_proxy_headers: bool,
    /// Number of proxies in front of the server that append to
    /// `X-Forwarded-For`. The client is the entry this many places from the
    /// right; anything further left is client supplied.
    pub trusted_proxy_hops: usize,
}

pub const DEFAULT_TRUSTED_PROXY_HOPS: usize = 1;

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            trust_proxy_headers: false,
            trusted_proxy_hops: DEFAULT_TRUSTED_PROXY_HOPS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    pub movies_page_size: u32,
    pub actors_page_size: u32,
    pub max_page_size: u32,
    pub max_review_depth: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let settings = CatalogSettings::default();
        Self {
            movies_page_size: settings.movies_page_size,
            actors_page_size: settings.actors_page_size,
            max_page_size: settings.max_page_size,
            max_review_depth: settings.max_review_depth,
        }
    }
}

impl From<CatalogConfig> for CatalogSettings {
    fn from(config: CatalogConfig) -> Self {
        CatalogSettings {
            movies_page_size: config.movies_page_size,
            actors_page_size: config.actors_page_size,
            max_page_size: config.max_page_size,
            max_review_depth: config.max_review_depth,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}
