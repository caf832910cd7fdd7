pub mod catalog;
pub mod config;
pub mod controllers;
pub mod csrf;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
pub mod views;

use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use catalog::Catalog;
use session::{MemorySessions, RedisSessions, SessionStore};
use store::{MemoryQuotations, QuotationStore};

// Shared state for every request
#[derive(Clone)]
pub struct AppState {
    pub quotations: QuotationStore,
    pub sessions: SessionStore,
    pub catalog: Catalog,
}

impl AppState {
    /// Connects storage and the session store, running migrations first.
    pub async fn connect(config: &config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database)
            .await
            .context("failed to connect to database")?;
        info!("Database connected");

        db.run_migrations()
            .await
            .context("failed to run migrations")?;

        let sessions = RedisSessions::connect(&config.redis.url, config.session.ttl_seconds)
            .await
            .context("failed to connect to Redis")?;
        info!("Redis connected");

        Ok(Arc::new(Self {
            quotations: QuotationStore::Postgres(db),
            sessions: SessionStore::Redis(sessions),
            catalog: Catalog::default(),
        }))
    }

    /// State backed by process memory; used by tests and local demos.
    pub fn in_memory(
        quotations: MemoryQuotations,
        sessions: MemorySessions,
        catalog: Catalog,
    ) -> Arc<Self> {
        Arc::new(Self {
            quotations: QuotationStore::Memory(quotations),
            sessions: SessionStore::Memory(sessions),
            catalog,
        })
    }
}

/// The full application router.
pub fn app(state: Arc<AppState>) -> Router {
    controllers::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
