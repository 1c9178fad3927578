#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Result, anyhow};
use axum_test::TestServer;
use marquee_core::{
    application::{AppUnitOfWork, AppUnitOfWorkBuilder},
    database::PostgresDatabase,
    testing::InMemoryCatalog,
};
use marquee_server::{
    AppState,
    app::create_app,
    infra::config::{
        CatalogConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig, SecurityConfig,
        ServerConfig,
    },
};
use sqlx::PgPool;

pub const FORWARDED_FOR: &str = "X-Forwarded-For";

pub struct TestApp {
    pub server: TestServer,
    pub catalog: Arc<InMemoryCatalog>,
}

/// Config for tests: proxy headers trusted so each test can act as several
/// clients over one loopback connection.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 1,
        },
        cors: CorsConfig {
            allowed_origins: vec![],
        },
        security: SecurityConfig {
            trust_proxy_headers: true,
            trusted_proxy_hops: 1,
        },
        catalog: CatalogConfig::default(),
        dev_mode: true,
        metadata: ConfigMetadata::default(),
    }
}

fn serve(unit_of_work: AppUnitOfWork, config: Config) -> Result<TestServer> {
    let state = AppState::new(unit_of_work, config);
    let make_service = create_app(state).into_make_service_with_connect_info::<SocketAddr>();
    TestServer::builder()
        .http_transport()
        .build(make_service)
        .map_err(|err| anyhow!(err.to_string()))
}

pub fn build_test_app_with(config: Config) -> Result<TestApp> {
    let catalog = Arc::new(InMemoryCatalog::new());
    let unit_of_work = AppUnitOfWorkBuilder::new()
        .with_movies(catalog.clone())
        .with_actors(catalog.clone())
        .with_reviews(catalog.clone())
        .with_ratings(catalog.clone())
        .build()
        .map_err(|err| anyhow!("failed to build unit of work: {err}"))?;

    Ok(TestApp {
        server: serve(unit_of_work, config)?,
        catalog,
    })
}

pub fn build_test_app() -> Result<TestApp> {
    build_test_app_with(test_config())
}

pub fn build_postgres_test_server(pool: PgPool) -> Result<TestServer> {
    let postgres = Arc::new(PostgresDatabase::from_pool(pool));
    let unit_of_work = AppUnitOfWork::from_postgres(postgres)
        .map_err(|err| anyhow!("failed to build unit of work: {err}"))?;
    serve(unit_of_work, test_config())
}
