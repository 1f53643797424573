use crate::dtos::plan::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::warn;
use planner::error::PlanError;

/// Errors returned by the planner endpoints
#[derive(Debug)]
pub enum ApiError {
    Plan(PlanError),
    BadRequest(String),
    NotFound(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Plan(PlanError::TermNotFound(_) | PlanError::CourseNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Plan(PlanError::DuplicateCourse(_) | PlanError::CreditLimitExceeded { .. }) => {
                StatusCode::CONFLICT
            }
            Self::Plan(PlanError::YearOutOfRange { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        Self::Plan(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            Self::Plan(err) => err.to_string(),
            Self::BadRequest(message) | Self::NotFound(message) => message,
        };
        warn!("Request rejected ({status}): {error}");

        (status, Json(ErrorResponse { error })).into_response()
    }
}
