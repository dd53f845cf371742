use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const UPSTREAM_FALLBACK: &str = "Failed to fetch OpenAI response";

/// Every way a `/openai` call can fail, already mapped to what the caller sees.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("GitHub user data is required")]
    MissingProfile,
    #[error("Repository name and description are required")]
    MissingRepository,
    #[error("Invalid request type")]
    InvalidType,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("{message}")]
    Upstream { status: u16, message: String },
    // The detail is for logs only; callers get a generic message.
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// Text placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => INTERNAL_SERVER_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingProfile | Self::MissingRepository | Self::InvalidType => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message(),
        })
    }
}
