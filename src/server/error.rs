use crate::models::ErrorResponse;
use crate::utils::error::TwinPanelError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// HTTP 응답으로 변환되는 에러
///
/// 요청/파일 시스템 에러는 모두 400, 작업 스레드가 죽은 경우만 500.
#[derive(Debug)]
pub enum ApiError {
    Request(TwinPanelError),
    Internal(String),
}

impl From<TwinPanelError> for ApiError {
    fn from(err: TwinPanelError) -> Self {
        ApiError::Request(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Request(err) => {
                tracing::info!(error = %err, "request rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error_message: err.to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::Internal(reason) => {
                tracing::error!(reason = %reason, "request worker failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error_message: "internal error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
