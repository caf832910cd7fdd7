use axum::{extract::State, response::Html, routing::get, Router};
use std::sync::Arc;

use crate::{error::AppError, services::summary::summarize, views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vista", get(show_latest))
}

// GET /vista
async fn show_latest(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let quotation = state.quotations.latest().await?.ok_or(AppError::NotFound)?;
    let summary = summarize(&quotation, &state.catalog)?;
    Ok(Html(views::summary::render_summary(&summary)))
}
