// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 审计记录处理器
//!
//! 活动日志与状态历史的查询和手工补录。

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::dto::audit::{
    ActivityLogQuery, CreateActivityLogRequest, CreateStatusHistoryRequest,
    StatusHistoryListQuery, UpdateStatusHistoryRequest,
};
use crate::domain::models::Actor;
use crate::domain::services::audit::AuditService;
use crate::presentation::errors::AppError;

pub async fn list_activity_logs(
    Extension(audit): Extension<Arc<AuditService>>,
    Query(query): Query<ActivityLogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = audit.list_activity(query.into_filter()).await?;
    Ok(Json(rows))
}

pub async fn create_activity_log(
    Extension(audit): Extension<Arc<AuditService>>,
    Json(payload): Json<CreateActivityLogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let performed_by = Actor::from_request(payload.performed_by.as_deref());
    let row = audit
        .create_activity(
            payload.entity_type,
            payload.entity_id,
            payload.action,
            payload.field_name,
            payload.old_value,
            payload.new_value,
            payload.reason,
            performed_by.to_string(),
            payload.metadata,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn list_status_history(
    Extension(audit): Extension<Arc<AuditService>>,
    Query(query): Query<StatusHistoryListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = audit.list_status_history(query.service_request_id).await?;
    Ok(Json(rows))
}

pub async fn get_status_history(
    Extension(audit): Extension<Arc<AuditService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let row = audit.get_status_history(id).await?;
    Ok(Json(row))
}

pub async fn create_status_history(
    Extension(audit): Extension<Arc<AuditService>>,
    Json(payload): Json<CreateStatusHistoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row = audit
        .create_status_history(
            payload.service_request_id,
            payload.status,
            payload.notes,
            payload.changed_by,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_status_history(
    Extension(audit): Extension<Arc<AuditService>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusHistoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row = audit
        .update_status_history(id, payload.notes, payload.changed_by)
        .await?;
    Ok(Json(row))
}

pub async fn delete_status_history(
    Extension(audit): Extension<Arc<AuditService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let row = audit.delete_status_history(id).await?;
    Ok(Json(row))
}
