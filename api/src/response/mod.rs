use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::{ServiceError, attendance::AttendanceError};
use tracing::error;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// Error responses carry `T::default()` as `data`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

/// Empty JSON object used as the payload of bodiless responses.
#[derive(Debug, Serialize, Default)]
pub struct Empty {}

/// What every handler returns.
pub type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

pub fn ok<T: Serialize>(status: StatusCode, data: T, message: impl Into<String>) -> Reply<T> {
    (status, Json(ApiResponse::success(data, message)))
}

pub fn fail<T: Serialize + Default>(status: StatusCode, message: impl Into<String>) -> Reply<T> {
    (status, Json(ApiResponse::error(message)))
}

/// Database failures are logged and surfaced without detail.
fn internal<T: Serialize + Default>(err: &dyn std::fmt::Display) -> Reply<T> {
    error!(error = %err, "Request failed on a database error");
    fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

pub fn from_service_error<T: Serialize + Default>(err: ServiceError) -> Reply<T> {
    let status = match &err {
        ServiceError::Database(e) => return internal(e),
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
    };
    fail(status, err.to_string())
}

pub fn from_attendance_error<T: Serialize + Default>(err: AttendanceError) -> Reply<T> {
    let status = match &err {
        AttendanceError::Database(e) => return internal(e),
        AttendanceError::SessionNotFound => StatusCode::NOT_FOUND,
        AttendanceError::SessionExpired => StatusCode::GONE,
        AttendanceError::Forbidden(_) => StatusCode::FORBIDDEN,
        AttendanceError::Invalid(_) => StatusCode::BAD_REQUEST,
    };
    fail(status, err.to_string())
}
