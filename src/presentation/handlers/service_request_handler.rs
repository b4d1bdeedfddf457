// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 服务请求处理器

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::application::dto::service_request::{
    CreateServiceRequestRequest, NextJobCardResponse, ServiceRequestListQuery,
    StatusChangeRequest, UpdateServiceRequestRequest,
};
use crate::domain::models::Actor;
use crate::domain::services::workflow::WorkflowService;
use crate::presentation::errors::AppError;

pub async fn list_service_requests(
    Extension(workflow): Extension<Arc<WorkflowService>>,
    Query(query): Query<ServiceRequestListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = workflow.list(query.into_filter()).await?;
    Ok(Json(rows))
}

/// 创建服务请求
pub async fn create_service_request(
    Extension(workflow): Extension<Arc<WorkflowService>>,
    Json(payload): Json<CreateServiceRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let created = workflow.create(payload.into_input()).await?;
    info!(
        service_request_id = created.id,
        job_card_number = %created.job_card_number,
        "service request created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_service_request(
    Extension(workflow): Extension<Arc<WorkflowService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let row = workflow.get(id).await?;
    Ok(Json(row))
}

/// 更新服务请求，字段级变更写入活动日志
pub async fn update_service_request(
    Extension(workflow): Extension<Arc<WorkflowService>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateServiceRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (patch, actor) = payload.into_patch();
    let updated = workflow.update(id, patch, actor).await?;
    Ok(Json(updated))
}

pub async fn delete_service_request(
    Extension(workflow): Extension<Arc<WorkflowService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = workflow.delete(id).await?;
    Ok(Json(deleted))
}

/// 变更工作流状态
pub async fn change_status(
    Extension(workflow): Extension<Arc<WorkflowService>>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusChangeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let actor = Actor::from_request(payload.changed_by.as_deref());
    let updated = workflow
        .change_status(id, payload.status, payload.notes, actor)
        .await?;
    info!(
        service_request_id = updated.id,
        status = %updated.status,
        "service request status changed"
    );
    Ok(Json(updated))
}

/// 状态历史，时间正序
pub async fn history(
    Extension(workflow): Extension<Arc<WorkflowService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let rows = workflow.history(id).await?;
    Ok(Json(rows))
}

/// 预览下一个委托单编号
pub async fn next_job_card(
    Extension(workflow): Extension<Arc<WorkflowService>>,
) -> Result<impl IntoResponse, AppError> {
    let next = workflow.next_job_card().await?;
    Ok(Json(NextJobCardResponse::from(next)))
}
