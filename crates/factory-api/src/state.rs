use std::sync::Arc;

use sqlx::PgPool;

use factory_core::repositories::Repositories;
use factory_core::services::Services;
use factory_security::JwtService;
use factory_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub config: AppConfig,
    /// `None` when running on the in-memory store.
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories, db: Option<PgPool>) -> Self {
        let jwt = Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry,
            config.jwt.refresh_token_expiry,
        ));
        let services = Services::new(repos, jwt, config.provisioning.clone());

        Self {
            services,
            config,
            db,
        }
    }
}
