use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub security: FileSecurityConfig,
    #[serde(default)]
    pub catalog: FileCatalogConfig,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSecurityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_proxy_headers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_proxy_hops: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies_page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors_page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_review_depth: Option<usize>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub db_max_connections: Option<u32>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub trust_proxy_headers: Option<bool>,
    pub trusted_proxy_hops: Option<usize>,
    pub movies_page_size: Option<u32>,
    pub actors_page_size: Option<u32>,
    pub max_page_size: Option<u32>,
    pub max_review_depth: Option<usize>,
    pub dev_mode: Option<bool>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; `gather` reads the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            config_path: lookup("MARQUEE_CONFIG_PATH").map(PathBuf::from),
            server_host: lookup("SERVER_HOST"),
            server_port: lookup("SERVER_PORT").and_then(|s| s.parse().ok()),
            database_url: lookup("DATABASE_URL"),
            db_max_connections: lookup("DB_MAX_CONNECTIONS").and_then(|s| s.parse().ok()),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").map(|raw| parse_csv(&raw)),
            trust_proxy_headers: lookup("TRUST_PROXY_HEADERS").and_then(|raw| parse_bool(&raw)),
            trusted_proxy_hops: lookup("TRUSTED_PROXY_HOPS").and_then(|s| s.parse().ok()),
            movies_page_size: lookup("MOVIES_PAGE_SIZE").and_then(|s| s.parse().ok()),
            actors_page_size: lookup("ACTORS_PAGE_SIZE").and_then(|s| s.parse().ok()),
            max_page_size: lookup("MAX_PAGE_SIZE").and_then(|s| s.parse().ok()),
            max_review_depth: lookup("MAX_REVIEW_DEPTH").and_then(|s| s.parse().ok()),
            dev_mode: lookup("DEV_MODE").and_then(|raw| parse_bool(&raw)),
        }
    }
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
