// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 试验台任务处理器
//!
//! 任务的增删改查、生命周期操作（启动/完成/转移）、冲突检测
//! 与转移记录查询。

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::info;

use crate::application::dto::task::{
    ConflictCheckRequest, ConflictCheckResponse, CreateTaskRequest, LifecycleRequest,
    TaskListQuery, TaskResponse, TransferListQuery, TransferTaskRequest, TransferTaskResponse,
};
use crate::domain::models::Actor;
use crate::domain::services::error::ServiceError;
use crate::domain::services::scheduling::{ConflictQuery, SchedulingService};
use crate::presentation::errors::AppError;

/// 任务列表
pub async fn list_tasks(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Query(query): Query<TaskListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let views = scheduling.list_tasks(query.into_filter()).await?;
    let body: Vec<TaskResponse> = views.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// 创建任务并入队
pub async fn create_task(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = scheduling.create_task(payload.into_input()).await?;
    info!(
        task_id = view.task.id,
        testbed_id = view.task.testbed_id,
        queue_position = view.task.queue_position,
        "task queued"
    );
    Ok((StatusCode::CREATED, Json(TaskResponse::from(view))))
}

pub async fn get_task(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let view = scheduling.get_task(id).await?;
    Ok(Json(TaskResponse::from(view)))
}

pub async fn update_task(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Path(id): Path<i32>,
    Json(payload): Json<crate::application::dto::task::UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = scheduling.update_task(id, payload.into_patch()).await?;
    Ok(Json(TaskResponse::from(view)))
}

pub async fn delete_task(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let view = scheduling.delete_task(id).await?;
    Ok(Json(TaskResponse::from(view)))
}

/// 启动任务
pub async fn start_task(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Path(id): Path<i32>,
    payload: Option<Json<LifecycleRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let actor = actor_of(payload);
    let view = scheduling.start_task(id, actor).await?;
    info!(task_id = view.task.id, testbed_id = view.task.testbed_id, "task started");
    Ok(Json(TaskResponse::from(view)))
}

/// 完成任务
pub async fn complete_task(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Path(id): Path<i32>,
    payload: Option<Json<LifecycleRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let actor = actor_of(payload);
    let view = scheduling.complete_task(id, actor).await?;
    info!(task_id = view.task.id, testbed_id = view.task.testbed_id, "task completed");
    Ok(Json(TaskResponse::from(view)))
}

/// 转移任务到另一试验台
pub async fn transfer_task(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Path(id): Path<i32>,
    Json(payload): Json<TransferTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (view, transfer) = scheduling.transfer_task(id, payload.into_input()).await?;
    info!(
        task_id = view.task.id,
        from_testbed_id = transfer.from_testbed_id,
        to_testbed_id = transfer.to_testbed_id,
        "task transferred"
    );
    Ok(Json(TransferTaskResponse {
        task: TaskResponse::from(view),
        transfer,
    }))
}

/// 排期冲突检测
pub async fn check_conflicts(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Json(payload): Json<ConflictCheckRequest>,
) -> Result<impl IntoResponse, AppError> {
    let testbed_id = payload.testbed_id.ok_or_else(|| {
        ServiceError::validation("MISSING_TESTBED_ID", "testbedId is required")
    })?;
    let start = payload.scheduled_start_date.ok_or_else(|| {
        ServiceError::validation(
            "MISSING_SCHEDULED_START_DATE",
            "scheduledStartDate is required",
        )
    })?;
    let end = payload.scheduled_end_date.ok_or_else(|| {
        ServiceError::validation(
            "MISSING_SCHEDULED_END_DATE",
            "scheduledEndDate is required",
        )
    })?;
    let report = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id,
            employee_id: payload.employee_id,
            start,
            end,
            exclude_task_id: payload.exclude_task_id,
        })
        .await?;
    Ok(Json(ConflictCheckResponse::from(report)))
}

/// 转移记录列表
pub async fn list_transfers(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Query(query): Query<TransferListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = scheduling.list_transfers(query.task_id).await?;
    Ok(Json(rows))
}

fn actor_of(payload: Option<Json<LifecycleRequest>>) -> Actor {
    match payload {
        Some(Json(body)) => Actor::from_request(body.performed_by.as_deref()),
        None => Actor::System,
    }
}
