use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Shown instead of the generic error when the generator is throttling us
pub const SERVICE_BUSY_MESSAGE: &str =
    "El servicio está ocupado. Por favor intente nuevamente en un momento.";

/// Justification used when no catalog item fits the band and style
pub const NO_SUGGESTION_MESSAGE: &str = "No hay sugerencia de atuendo disponible.";

/// Tomorrow's wording of [`NO_SUGGESTION_MESSAGE`]
pub const NO_SUGGESTION_TOMORROW_MESSAGE: &str =
    "No hay sugerencia de atuendo disponible para mañana.";

/// Justification used when the generator answered with something we could not read
pub const NO_EXPLANATION_MESSAGE: &str = "No hay explicación disponible.";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Weather fetch error: {0}")]
    Fetch(String),

    #[error("Text generation rate limited: {0}")]
    RateLimited(String),

    #[error("Text generation error: {0}")]
    Generation(String),

    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for showing to the end user of the widget
    pub fn user_message(&self) -> String {
        match self {
            AppError::RateLimited(_) => SERVICE_BUSY_MESSAGE.to_string(),
            AppError::Fetch(msg) => format!("Error al obtener la temperatura: {}", msg),
            _ => format!("Error: {}", self),
        }
    }

    /// True for failures raised by the text-generation collaborator
    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            AppError::RateLimited(_) | AppError::Generation(_) | AppError::MalformedResponse(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Fetch(_) | AppError::Generation(_) | AppError::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Catalog(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.user_message()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
