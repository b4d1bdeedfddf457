// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::services::error::ServiceError;

/// 应用错误类型
///
/// 将业务服务错误映射为统一的 JSON 错误响应，
/// 响应体携带 `error` 消息与稳定的 `code` 错误码
#[derive(Debug)]
pub struct AppError(ServiceError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::Validation { .. } | ServiceError::Conflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Database(db_err) => {
                error!("database error: {}", db_err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string(),
            "code": self.0.code(),
        }));
        (status, body).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self(ServiceError::validation("VALIDATION_ERROR", err.to_string()))
    }
}
