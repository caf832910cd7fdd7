pub mod quotations;
pub mod summary;

use axum::{response::Redirect, routing::get, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/cotizacion") }))
        .route("/health", get(|| async { "OK" }))
        .merge(quotations::routes())
        .merge(summary::routes())
}
