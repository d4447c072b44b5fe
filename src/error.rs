use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::fis::FisError;

pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Please wait before making more requests.";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch data from FIS API";

#[derive(Debug)]
pub enum ApiError {
    RateLimited,
    Upstream(FisError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE),
            ApiError::Upstream(err) => {
                // Details stay in the logs; the client gets a generic message.
                tracing::debug!("Responding 500 after upstream error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_MESSAGE)
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<FisError> for ApiError {
    fn from(err: FisError) -> Self {
        if err.is_rate_limited() {
            ApiError::RateLimited
        } else {
            ApiError::Upstream(err)
        }
    }
}
