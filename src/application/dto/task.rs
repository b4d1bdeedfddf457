// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 试验台任务相关的数据传输对象

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::models::Actor;
use crate::domain::services::scheduling::{
    ConflictReport, NewTask, TaskFilter, TaskPatch, TaskView, TransferInput,
};
use crate::infrastructure::database::entities::{testbed_task, testbed_task_transfer};

/// 创建任务请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub service_request_id: i32,
    pub testbed_id: i32,
    pub assigned_employee_id: Option<i32>,
    pub priority: Option<String>,
    pub scheduled_start_date: Option<DateTime<FixedOffset>>,
    pub scheduled_end_date: Option<DateTime<FixedOffset>>,
    pub notes: Option<String>,
    /// 操作者，缺省记为 System
    pub performed_by: Option<String>,
}

impl CreateTaskRequest {
    pub fn into_input(self) -> NewTask {
        NewTask {
            service_request_id: self.service_request_id,
            testbed_id: self.testbed_id,
            assigned_employee_id: self.assigned_employee_id,
            priority: self.priority,
            scheduled_start_date: self.scheduled_start_date,
            scheduled_end_date: self.scheduled_end_date,
            notes: self.notes,
            performed_by: Actor::from_request(self.performed_by.as_deref()),
        }
    }
}

/// 更新任务请求
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub assigned_employee_id: Option<Option<i32>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default)]
    pub scheduled_start_date: Option<Option<DateTime<FixedOffset>>>,
    #[serde(default)]
    pub scheduled_end_date: Option<Option<DateTime<FixedOffset>>>,
    pub queue_position: Option<i32>,
    #[serde(default)]
    pub notes: Option<Option<String>>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            assigned_employee_id: self.assigned_employee_id,
            status: self.status,
            priority: self.priority,
            scheduled_start_date: self.scheduled_start_date,
            scheduled_end_date: self.scheduled_end_date,
            queue_position: self.queue_position,
            notes: self.notes,
        }
    }
}

/// 任务列表查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub testbed_id: Option<i32>,
    pub service_request_id: Option<i32>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl TaskListQuery {
    pub fn into_filter(self) -> TaskFilter {
        TaskFilter {
            testbed_id: self.testbed_id,
            service_request_id: self.service_request_id,
            status: self.status,
            priority: self.priority,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// 生命周期操作（启动/完成）请求体
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRequest {
    pub performed_by: Option<String>,
}

/// 任务转移请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTaskRequest {
    pub to_testbed_id: i32,
    pub reason: String,
    pub transferred_by: Option<String>,
    pub notes: Option<String>,
}

impl TransferTaskRequest {
    pub fn into_input(self) -> TransferInput {
        TransferInput {
            to_testbed_id: self.to_testbed_id,
            reason: self.reason,
            transferred_by: Actor::from_request(self.transferred_by.as_deref()),
            notes: self.notes,
        }
    }
}

/// 冲突检测请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckRequest {
    pub testbed_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub scheduled_start_date: Option<DateTime<FixedOffset>>,
    pub scheduled_end_date: Option<DateTime<FixedOffset>>,
    pub exclude_task_id: Option<i32>,
}

/// 转移记录列表查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransferListQuery {
    pub task_id: Option<i32>,
}

/// 任务响应，附带所属服务请求的作业卡编号
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[serde(flatten)]
    pub task: testbed_task::Model,
    pub job_card_number: Option<String>,
}

impl From<TaskView> for TaskResponse {
    fn from(view: TaskView) -> Self {
        Self {
            task: view.task,
            job_card_number: view.job_card_number,
        }
    }
}

/// 任务转移响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTaskResponse {
    pub task: TaskResponse,
    pub transfer: testbed_task_transfer::Model,
}

/// 冲突检测响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckResponse {
    pub conflicts: bool,
    pub testbed_conflicts: Vec<TaskResponse>,
    pub employee_conflicts: Vec<TaskResponse>,
    pub message: String,
}

impl From<ConflictReport> for ConflictCheckResponse {
    fn from(report: ConflictReport) -> Self {
        Self {
            conflicts: report.conflicts,
            testbed_conflicts: report.testbed_conflicts.into_iter().map(Into::into).collect(),
            employee_conflicts: report
                .employee_conflicts
                .into_iter()
                .map(Into::into)
                .collect(),
            message: report.message,
        }
    }
}
