// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::error;

// endregion: --- Imports

// region:    --- Service Error

/// 서비스 전역 오류 분류
/// 모든 실패 경로는 이 타입으로 수렴하여 호출자에게 반환된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// 누락되거나 잘못된 입력
    InvalidInput(String),
    /// 현재 상태와 충돌하는 요청 (진행 중인 경매 존재 등)
    Conflict(String),
    /// 대상 리소스 없음
    NotFound(String),
    /// 인증 실패
    Unauthorized(String),
    /// 외부 협력 서비스(미디어 저장소) 실패
    UpstreamFailure(String),
    /// 예기치 못한 내부 오류
    Internal(String),
}

impl ServiceError {
    /// 오류 분류에 대응하는 HTTP 상태 코드
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::UpstreamFailure(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 사용자에게 전달되는 메시지
    /// 내부 오류는 상세를 숨기고 일반 메시지로 대체한다.
    pub fn public_message(&self) -> &str {
        match self {
            ServiceError::InvalidInput(message)
            | ServiceError::Conflict(message)
            | ServiceError::NotFound(message)
            | ServiceError::Unauthorized(message)
            | ServiceError::UpstreamFailure(message) => message,
            ServiceError::Internal(_) => "Internal server error.",
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidInput(message) => write!(f, "invalid input: {}", message),
            ServiceError::Conflict(message) => write!(f, "conflict: {}", message),
            ServiceError::NotFound(message) => write!(f, "not found: {}", message),
            ServiceError::Unauthorized(message) => write!(f, "unauthorized: {}", message),
            ServiceError::UpstreamFailure(message) => write!(f, "upstream failure: {}", message),
            ServiceError::Internal(message) => write!(f, "internal error: {}", message),
        }
    }
}

impl std::error::Error for ServiceError {}

/// 저장소 오류 변환
impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => {
                ServiceError::NotFound("Resource not found.".to_string())
            }
            sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                ServiceError::Conflict("Duplicate record.".to_string())
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// JSON 응답 변환: {"success": false, "message": ...}
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let ServiceError::Internal(detail) = &self {
            error!("{:<12} --> 내부 오류: {}", "Error", detail);
        }
        let body = json!({
            "success": false,
            "message": self.public_message(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

// endregion: --- Service Error
