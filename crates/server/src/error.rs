use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::recipe::RecipeError;
use services::services::recipe_form::ValidationError;
use thiserror::Error;
use tracing::error;

use crate::templates::RenderError;

/// Terminal failure for a request. The message is shown to the user as plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Recipe(#[from] RecipeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Recipe(RecipeError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Recipe(RecipeError::Cancelled(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Recipe(RecipeError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}
