use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use thiserror::Error;
use url::Url;

use super::{
    models::{
        CatalogConfig, Config, ConfigMetadata, ConfigWarnings, CorsConfig, DatabaseConfig,
        DEFAULT_TRUSTED_PROXY_HOPS, SecurityConfig, ServerConfig,
    },
    sources::{EnvConfig, FileConfig},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("marquee.toml"),
        PathBuf::from("config/marquee.toml"),
    ]
});

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Load `.env`, then compose defaults, the TOML file and the process
    /// environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path)
                .map(|_| true)
                .or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?,
            None => dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Compose a configuration from an explicit environment snapshot.
    pub fn load_with_env(&self, env: EnvConfig) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) = compose_config(file_config, env, config_path)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig { path });
                }
                path
            }
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
            path: path.clone(),
            source: err,
        })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if config_path.is_none() {
        warnings.push_with_hint(
            "No marquee.toml detected; using defaults and environment variables",
            "Create marquee.toml or set MARQUEE_CONFIG_PATH to pin settings",
        );
    }

    let FileConfig {
        server: file_server,
        database: file_database,
        cors: file_cors,
        security: file_security,
        catalog: file_catalog,
        dev_mode: file_dev_mode,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| "0.0.0.0".to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
    };

    let database_url = env
        .database_url
        .or(file_database.url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());
    if let Some(url) = &database_url {
        validate_database_url(url)?;
    }
    let max_connections = env
        .db_max_connections
        .or(file_database.max_connections)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);
    if max_connections == 0 {
        return Err(ConfigLoadError::InvalidSetting {
            setting: "database.max_connections",
            reason: "must be at least 1".to_string(),
        });
    }
    let database = DatabaseConfig {
        url: database_url,
        max_connections,
    };

    let dev_mode = env.dev_mode.or(file_dev_mode).unwrap_or(false);

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_else(default_cors_origins),
    };
    if dev_mode {
        warnings.push("DEV_MODE is enabled; CORS allows any origin");
    }

    let security = SecurityConfig {
        trust_proxy_headers: env
            .trust_proxy_headers
            .or(file_security.trust_proxy_headers)
            .unwrap_or(false),
        trusted_proxy_hops: env
            .trusted_proxy_hops
            .or(file_security.trusted_proxy_hops)
            .unwrap_or(DEFAULT_TRUSTED_PROXY_HOPS),
    };
    if security.trusted_proxy_hops == 0 {
        return Err(ConfigLoadError::InvalidSetting {
            setting: "security.trusted_proxy_hops",
            reason: "must be at least 1".to_string(),
        });
    }
    if security.trust_proxy_headers {
        warnings.push_with_hint(
            format!(
                "Client identity is taken from X-Forwarded-For, {} hop(s) from the right",
                security.trusted_proxy_hops
            ),
            "Set security.trusted_proxy_hops to the number of proxies that append to the header",
        );
    }

    let defaults = CatalogConfig::default();
    let catalog = CatalogConfig {
        movies_page_size: env
            .movies_page_size
            .or(file_catalog.movies_page_size)
            .unwrap_or(defaults.movies_page_size),
        actors_page_size: env
            .actors_page_size
            .or(file_catalog.actors_page_size)
            .unwrap_or(defaults.actors_page_size),
        max_page_size: env
            .max_page_size
            .or(file_catalog.max_page_size)
            .unwrap_or(defaults.max_page_size),
        max_review_depth: env
            .max_review_depth
            .or(file_catalog.max_review_depth)
            .unwrap_or(defaults.max_review_depth),
    };
    validate_catalog(&catalog)?;

    let config = Config {
        server,
        database,
        cors,
        security,
        catalog,
        dev_mode,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    Ok((config, warnings))
}

fn validate_database_url(raw: &str) -> Result<(), ConfigLoadError> {
    let parsed = Url::parse(raw).map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
    match parsed.scheme() {
        "postgres" | "postgresql" => Ok(()),
        other => Err(ConfigLoadError::UnsupportedDatabase {
            scheme: other.to_string(),
        }),
    }
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigLoadError> {
    for (setting, value) in [
        ("catalog.movies_page_size", catalog.movies_page_size),
        ("catalog.actors_page_size", catalog.actors_page_size),
        ("catalog.max_page_size", catalog.max_page_size),
    ] {
        if value == 0 {
            return Err(ConfigLoadError::InvalidSetting {
                setting,
                reason: "must be at least 1".to_string(),
            });
        }
        if value > catalog.max_page_size {
            return Err(ConfigLoadError::InvalidSetting {
                setting,
                reason: format!(
                    "{} exceeds catalog.max_page_size ({})",
                    value, catalog.max_page_size
                ),
            });
        }
    }
    if catalog.max_review_depth == 0 {
        return Err(ConfigLoadError::InvalidSetting {
            setting: "catalog.max_review_depth",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid database URL")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported database scheme '{scheme}', expected postgres")]
    UnsupportedDatabase { scheme: String },
    #[error("invalid {setting}: {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: String,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
