// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 试验台处理器
//!
//! 试验台增删改查，以及队列视图与当前任务查询。

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::task::TaskResponse;
use crate::application::dto::test_bed::{
    CreateTestBedRequest, TestBedListQuery, UpdateTestBedRequest,
};
use crate::domain::services::scheduling::SchedulingService;
use crate::domain::services::test_beds::TestBedService;
use crate::presentation::errors::AppError;

pub async fn list_test_beds(
    Extension(test_beds): Extension<Arc<TestBedService>>,
    Query(query): Query<TestBedListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = test_beds.list(query.into_filter()).await?;
    Ok(Json(rows))
}

pub async fn create_test_bed(
    Extension(test_beds): Extension<Arc<TestBedService>>,
    Json(payload): Json<CreateTestBedRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let bed = test_beds.create(payload.into_input()).await?;
    Ok((StatusCode::CREATED, Json(bed)))
}

pub async fn get_test_bed(
    Extension(test_beds): Extension<Arc<TestBedService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let bed = test_beds.get(id).await?;
    Ok(Json(bed))
}

pub async fn update_test_bed(
    Extension(test_beds): Extension<Arc<TestBedService>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTestBedRequest>,
) -> Result<impl IntoResponse, AppError> {
    let bed = test_beds.update(id, payload.into_patch()).await?;
    Ok(Json(bed))
}

pub async fn delete_test_bed(
    Extension(test_beds): Extension<Arc<TestBedService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let bed = test_beds.delete(id).await?;
    Ok(Json(bed))
}

/// 试验台排队队列
pub async fn queue(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let views = scheduling.queue(id).await?;
    let body: Vec<TaskResponse> = views.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// 试验台当前进行中的任务
pub async fn current_task(
    Extension(scheduling): Extension<Arc<SchedulingService>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let view = scheduling.current_task(id).await?;
    Ok(Json(TaskResponse::from(view)))
}
