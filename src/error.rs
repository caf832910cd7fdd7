use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::ConfigError;
use crate::views;

/// Every failure a request can end in. Only `Validation` carries text that is
/// shown to the user; everything else renders a fixed message and the detail
/// goes to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("session store error: {0}")]
    Session(#[from] redis::RedisError),

    #[error("anti-forgery token rejected: {0}")]
    Security(&'static str),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no quotations stored")]
    NotFound,

    #[error("storage query failed: {0}")]
    Storage(#[source] sqlx::Error),

    #[error("stored selections could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("in-memory store lock poisoned")]
    Poisoned,
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => AppError::Connection(err),
            other => AppError::Storage(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Security(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Connection(_) | AppError::Session(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Storage(_)
            | AppError::Decode(_)
            | AppError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Markup shown to the user. Never includes internal error detail.
    pub fn user_fragment(&self) -> String {
        match self {
            AppError::Security(_) => views::error_heading(
                "Error: CSRF token inválido. Recarga la página e intenta nuevamente.",
            ),
            AppError::Validation(message) => {
                views::alert("danger", &format!("Error en el formulario: {message}"))
            }
            AppError::NotFound => views::error_heading("No hay cotizaciones registradas."),
            AppError::Connection(_) | AppError::Session(_) => {
                views::error_heading("Error de conexión. Contacte al administrador.")
            }
            AppError::Config(_) => {
                views::error_heading("Error: Configuración de base de datos incompleta.")
            }
            AppError::Storage(_) | AppError::Decode(_) | AppError::Poisoned => views::alert(
                "danger",
                "Error al procesar la cotización. Contacte al administrador.",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Security(reason) => warn!("rejected submission: {}", reason),
            AppError::Validation(message) => warn!("invalid submission: {}", message),
            AppError::NotFound => info!("summary requested with no quotations stored"),
            other => error!("request failed: {:?}", other),
        }

        (self.status(), Html(self.user_fragment())).into_response()
    }
}
