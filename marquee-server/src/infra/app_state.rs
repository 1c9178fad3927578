use std::{fmt, sync::Arc};

use marquee_core::application::{AppUnitOfWork, CatalogService};

use crate::infra::config::{Config, SecurityConfig};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("bind_address", &self.config.bind_address())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(unit_of_work: AppUnitOfWork, config: Config) -> Self {
        let catalog = CatalogService::new(unit_of_work, config.catalog.into());
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn security(&self) -> SecurityConfig {
        self.config.security
    }
}
