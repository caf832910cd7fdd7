use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::{
    csrf,
    error::AppError,
    middleware::Session,
    services::submission::{self, SubmissionForm},
    views, AppState,
};

pub const SUMMARY_PATH: &str = "/vista";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cotizacion", get(show_form).post(submit_quotation))
}

// GET /cotizacion
async fn show_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, AppError> {
    let token = state.sessions.get_or_create_token(&session.id).await?;

    let mut headers = HeaderMap::new();
    if let Some(cookie) = session.set_cookie() {
        headers.insert(header::SET_COOKIE, cookie);
    }

    Ok((headers, Html(views::form::render_form(&token, &state.catalog))).into_response())
}

// POST /cotizacion
async fn submit_quotation(
    State(state): State<Arc<AppState>>,
    session: Session,
    body: Bytes,
) -> Result<Response, AppError> {
    let form = SubmissionForm::from_urlencoded(&body);

    // The session token is gone after this line whatever happens next
    let stored = if session.is_new {
        None
    } else {
        state.sessions.take_token(&session.id).await?
    };
    csrf::verify(form.csrf_token.as_deref(), stored.as_deref())?;

    let new_quotation = submission::prepare(&form, &state.catalog)?;
    let id = state.quotations.insert(&new_quotation).await?;
    info!("quotation {} stored for session {}", id, session.id);

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, SUMMARY_PATH)],
        Html(views::alert("success", "Cotización guardada exitosamente.")),
    )
        .into_response())
}
