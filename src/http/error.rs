//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::dto::ConflictDetails;
use crate::error::ScheduleError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Operator-facing message, shown verbatim.
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Both intervals, for overlap rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ConflictDetails>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            conflict: None,
        }
    }

    pub fn with_conflict(mut self, conflict: ConflictDetails) -> Self {
        self.conflict = Some(conflict);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Structured scheduling rejection
    Schedule(ScheduleError),
    /// Malformed request outside the scheduling rules
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Schedule(ScheduleError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Schedule(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Schedule(err) => {
                let body = ApiError::new(err.code(), err.to_string());
                match &err {
                    ScheduleError::OverlapConflict(conflict) => {
                        body.with_conflict(ConflictDetails::from(conflict))
                    }
                    _ => body,
                }
            }
            AppError::BadRequest(msg) => ApiError::new("BAD_REQUEST", msg),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::Schedule(err)
    }
}
