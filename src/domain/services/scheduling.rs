// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 调度服务
//!
//! 负责试验台任务的完整生命周期：入队、启动、完成、转移、
//! 冲突检测以及队列视图。所有跨表写入都在单个事务内执行，
//! Postgres 后端在启动/完成/转移时对任务行加排它锁。

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use sea_orm::sea_query::{CaseStatement, Expr, LockType, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use crate::domain::models::{Actor, TaskPriority, TaskStatus, TestBedStatus};
use crate::domain::services::audit::{self, NewActivity, ENTITY_TESTBED_TASK};
use crate::domain::services::error::ServiceError;
use crate::infrastructure::database::entities::{
    employee, service_request, test_bed, testbed_task, testbed_task_transfer,
};
use crate::utils::clock::Clock;

/// 任务及其所属服务请求的作业卡编号
#[derive(Debug, Clone)]
pub struct TaskView {
    pub task: testbed_task::Model,
    pub job_card_number: Option<String>,
}

/// 新建任务入参
#[derive(Debug, Clone)]
pub struct NewTask {
    pub service_request_id: i32,
    pub testbed_id: i32,
    pub assigned_employee_id: Option<i32>,
    pub priority: Option<String>,
    pub scheduled_start_date: Option<DateTime<FixedOffset>>,
    pub scheduled_end_date: Option<DateTime<FixedOffset>>,
    pub notes: Option<String>,
    pub performed_by: Actor,
}

/// 任务字段更新入参
///
/// 外层 `None` 表示请求未携带该字段，内层 `None` 表示显式置空。
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub assigned_employee_id: Option<Option<i32>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub scheduled_start_date: Option<Option<DateTime<FixedOffset>>>,
    pub scheduled_end_date: Option<Option<DateTime<FixedOffset>>>,
    pub queue_position: Option<i32>,
    pub notes: Option<Option<String>>,
}

/// 任务列表查询条件
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub testbed_id: Option<i32>,
    pub service_request_id: Option<i32>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// 任务转移入参
#[derive(Debug, Clone)]
pub struct TransferInput {
    pub to_testbed_id: i32,
    pub reason: String,
    pub transferred_by: Actor,
    pub notes: Option<String>,
}

/// 冲突检测查询
#[derive(Debug, Clone)]
pub struct ConflictQuery {
    pub testbed_id: i32,
    pub employee_id: Option<i32>,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub exclude_task_id: Option<i32>,
}

/// 冲突检测结果，仅供参考，不阻止写入
#[derive(Debug, Clone)]
pub struct ConflictReport {
    pub conflicts: bool,
    pub testbed_conflicts: Vec<TaskView>,
    pub employee_conflicts: Vec<TaskView>,
    pub message: String,
}

/// 调度服务
pub struct SchedulingService {
    db: Arc<DatabaseConnection>,
    clock: Arc<dyn Clock>,
}

impl SchedulingService {
    pub fn new(db: Arc<DatabaseConnection>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// 创建任务并入队
    ///
    /// 队列位置为同一试验台当前排队任务数加一，位置只增不减，
    /// 出队后留下的空隙不回填。
    pub async fn create_task(&self, input: NewTask) -> Result<TaskView, ServiceError> {
        let priority = parse_priority(input.priority.as_deref())?;
        validate_window(input.scheduled_start_date, input.scheduled_end_date)?;

        let service_request = service_request::Entity::find_by_id(input.service_request_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    "SERVICE_REQUEST_NOT_FOUND",
                    format!("Service request {} not found", input.service_request_id),
                )
            })?;
        ensure_test_bed(self.db.as_ref(), input.testbed_id).await?;
        if let Some(employee_id) = input.assigned_employee_id {
            ensure_employee(self.db.as_ref(), employee_id).await?;
        }

        let now = self.clock.now();
        let txn = self.db.begin().await?;

        let queued = testbed_task::Entity::find()
            .filter(testbed_task::Column::TestbedId.eq(input.testbed_id))
            .filter(testbed_task::Column::Status.eq(TaskStatus::Queued.to_string()))
            .count(&txn)
            .await?;

        let task = testbed_task::ActiveModel {
            service_request_id: Set(input.service_request_id),
            testbed_id: Set(input.testbed_id),
            assigned_employee_id: Set(input.assigned_employee_id),
            status: Set(TaskStatus::Queued.to_string()),
            priority: Set(priority.to_string()),
            scheduled_start_date: Set(input.scheduled_start_date),
            scheduled_end_date: Set(input.scheduled_end_date),
            actual_start_date: Set(None),
            actual_end_date: Set(None),
            queue_position: Set(queued as i32 + 1),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        audit::record_activity(
            &txn,
            NewActivity::event(
                ENTITY_TESTBED_TASK,
                task.id,
                "created",
                input.performed_by.to_string(),
                now,
            ),
        )
        .await?;

        txn.commit().await?;
        Ok(TaskView {
            job_card_number: Some(service_request.job_card_number),
            task,
        })
    }

    /// 按编号获取任务
    pub async fn get_task(&self, id: i32) -> Result<TaskView, ServiceError> {
        let task = find_task(self.db.as_ref(), id).await?;
        let mut views = with_job_cards(self.db.as_ref(), vec![task]).await?;
        Ok(views.remove(0))
    }

    /// 任务列表，按创建时间倒序
    pub async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<TaskView>, ServiceError> {
        if let Some(status) = filter.status.as_deref() {
            if status.parse::<TaskStatus>().is_err() {
                return Err(ServiceError::validation(
                    "INVALID_STATUS",
                    format!("Invalid status: {}", status),
                ));
            }
        }
        if let Some(priority) = filter.priority.as_deref() {
            if priority.parse::<TaskPriority>().is_err() {
                return Err(ServiceError::validation(
                    "INVALID_PRIORITY",
                    format!("Invalid priority: {}", priority),
                ));
            }
        }

        let mut query = testbed_task::Entity::find();
        if let Some(testbed_id) = filter.testbed_id {
            query = query.filter(testbed_task::Column::TestbedId.eq(testbed_id));
        }
        if let Some(service_request_id) = filter.service_request_id {
            query = query.filter(testbed_task::Column::ServiceRequestId.eq(service_request_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(testbed_task::Column::Status.eq(status));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(testbed_task::Column::Priority.eq(priority));
        }
        let tasks = query
            .order_by_desc(testbed_task::Column::CreatedAt)
            .order_by_desc(testbed_task::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(self.db.as_ref())
            .await?;
        let views = with_job_cards(self.db.as_ref(), tasks).await?;
        Ok(views)
    }

    /// 更新任务的可变字段
    ///
    /// 直接写入状态不触发试验台同步，占用与释放只随
    /// 启动/完成/转移等生命周期操作发生。
    pub async fn update_task(&self, id: i32, patch: TaskPatch) -> Result<TaskView, ServiceError> {
        let task = find_task(self.db.as_ref(), id).await?;

        if let Some(status) = patch.status.as_deref() {
            if status.parse::<TaskStatus>().is_err() {
                return Err(ServiceError::validation(
                    "INVALID_STATUS",
                    format!("Invalid status: {}", status),
                ));
            }
        }
        if let Some(priority) = patch.priority.as_deref() {
            parse_priority(Some(priority))?;
        }
        if let Some(position) = patch.queue_position {
            if position < 1 {
                return Err(ServiceError::validation(
                    "INVALID_QUEUE_POSITION",
                    format!("Queue position must be positive, got {}", position),
                ));
            }
        }
        let start = match patch.scheduled_start_date {
            Some(value) => value,
            None => task.scheduled_start_date,
        };
        let end = match patch.scheduled_end_date {
            Some(value) => value,
            None => task.scheduled_end_date,
        };
        validate_window(start, end)?;
        if let Some(Some(employee_id)) = patch.assigned_employee_id {
            ensure_employee(self.db.as_ref(), employee_id).await?;
        }

        let mut active: testbed_task::ActiveModel = task.into();
        if let Some(assigned) = patch.assigned_employee_id {
            active.assigned_employee_id = Set(assigned);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        if let Some(priority) = patch.priority {
            active.priority = Set(priority);
        }
        if let Some(position) = patch.queue_position {
            active.queue_position = Set(position);
        }
        if let Some(start) = patch.scheduled_start_date {
            active.scheduled_start_date = Set(start);
        }
        if let Some(end) = patch.scheduled_end_date {
            active.scheduled_end_date = Set(end);
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(self.clock.now());
        let task = active.update(self.db.as_ref()).await?;

        let mut views = with_job_cards(self.db.as_ref(), vec![task]).await?;
        Ok(views.remove(0))
    }

    /// 删除任务
    ///
    /// 不回填队列空隙，也不改动试验台状态。删除进行中任务会留下
    /// 占用中的试验台，需要调用方自行处理。
    pub async fn delete_task(&self, id: i32) -> Result<TaskView, ServiceError> {
        let task = find_task(self.db.as_ref(), id).await?;
        let mut views = with_job_cards(self.db.as_ref(), vec![task]).await?;
        testbed_task::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(views.remove(0))
    }

    /// 启动任务
    ///
    /// 同一试验台同一时刻至多一个进行中任务。并发启动由事务内
    /// 重读裁决，Postgres 后端额外对任务行加排它锁。
    pub async fn start_task(&self, id: i32, performed_by: Actor) -> Result<TaskView, ServiceError> {
        let now = self.clock.now();
        let txn = self.db.begin().await?;

        let task = find_task_for_update(&txn, id).await?;
        if task.status != TaskStatus::Queued.to_string() {
            txn.rollback().await?;
            return Err(ServiceError::conflict(
                "TASK_NOT_QUEUED",
                format!("Only queued tasks can be started, current status: {}", task.status),
            ));
        }

        let running = testbed_task::Entity::find()
            .filter(testbed_task::Column::TestbedId.eq(task.testbed_id))
            .filter(testbed_task::Column::Status.eq(TaskStatus::InProgress.to_string()))
            .one(&txn)
            .await?;
        if let Some(running) = running {
            txn.rollback().await?;
            return Err(ServiceError::conflict(
                "TESTBED_IN_USE",
                format!(
                    "Test bed {} already has task {} in progress",
                    task.testbed_id, running.id
                ),
            ));
        }

        let service_request_id = task.service_request_id;
        let testbed_id = task.testbed_id;
        let mut active: testbed_task::ActiveModel = task.into();
        active.status = Set(TaskStatus::InProgress.to_string());
        active.actual_start_date = Set(Some(now));
        active.updated_at = Set(now);
        let task = active.update(&txn).await?;

        set_test_bed_status(&txn, testbed_id, TestBedStatus::InUse).await?;
        stamp_testing_start(&txn, service_request_id, now).await?;

        audit::record_activity(
            &txn,
            NewActivity::event(
                ENTITY_TESTBED_TASK,
                task.id,
                "started",
                performed_by.to_string(),
                now,
            ),
        )
        .await?;

        txn.commit().await?;
        let mut views = with_job_cards(self.db.as_ref(), vec![task]).await?;
        Ok(views.remove(0))
    }

    /// 完成任务
    ///
    /// 无条件释放试验台，若服务请求尚无测试结束时间则补写。
    pub async fn complete_task(
        &self,
        id: i32,
        performed_by: Actor,
    ) -> Result<TaskView, ServiceError> {
        let now = self.clock.now();
        let txn = self.db.begin().await?;

        let task = find_task_for_update(&txn, id).await?;
        if task.status != TaskStatus::InProgress.to_string() {
            txn.rollback().await?;
            return Err(ServiceError::conflict(
                "TASK_NOT_IN_PROGRESS",
                format!(
                    "Only in-progress tasks can be completed, current status: {}",
                    task.status
                ),
            ));
        }
        if task.actual_start_date.is_none() {
            txn.rollback().await?;
            return Err(ServiceError::conflict(
                "TASK_NOT_STARTED",
                format!("Task {} has no actual start date", task.id),
            ));
        }

        let service_request_id = task.service_request_id;
        let testbed_id = task.testbed_id;
        let mut active: testbed_task::ActiveModel = task.into();
        active.status = Set(TaskStatus::Completed.to_string());
        active.actual_end_date = Set(Some(now));
        active.updated_at = Set(now);
        let task = active.update(&txn).await?;

        set_test_bed_status(&txn, testbed_id, TestBedStatus::Available).await?;
        stamp_testing_end(&txn, service_request_id, now).await?;

        audit::record_activity(
            &txn,
            NewActivity::event(
                ENTITY_TESTBED_TASK,
                task.id,
                "completed",
                performed_by.to_string(),
                now,
            ),
        )
        .await?;

        txn.commit().await?;
        let mut views = with_job_cards(self.db.as_ref(), vec![task]).await?;
        Ok(views.remove(0))
    }

    /// 转移任务到另一试验台
    ///
    /// 任务重置为排队状态并排到目标队列末尾，原进行中任务会
    /// 释放来源试验台。转移记录不可变更。
    pub async fn transfer_task(
        &self,
        id: i32,
        input: TransferInput,
    ) -> Result<(TaskView, testbed_task_transfer::Model), ServiceError> {
        if input.reason.trim().is_empty() {
            return Err(ServiceError::validation(
                "MISSING_TRANSFER_REASON",
                "Transfer reason is required",
            ));
        }
        ensure_test_bed(self.db.as_ref(), input.to_testbed_id).await?;

        let now = self.clock.now();
        let txn = self.db.begin().await?;

        let task = find_task_for_update(&txn, id).await?;
        let was_in_progress = task.status == TaskStatus::InProgress.to_string();
        if !was_in_progress && task.status != TaskStatus::Queued.to_string() {
            txn.rollback().await?;
            return Err(ServiceError::conflict(
                "TASK_NOT_TRANSFERABLE",
                format!(
                    "Only queued or in-progress tasks can be transferred, current status: {}",
                    task.status
                ),
            ));
        }
        if task.testbed_id == input.to_testbed_id {
            txn.rollback().await?;
            return Err(ServiceError::validation(
                "SAME_TESTBED_TRANSFER",
                "Task is already on the target test bed",
            ));
        }

        let queued = testbed_task::Entity::find()
            .filter(testbed_task::Column::TestbedId.eq(input.to_testbed_id))
            .filter(testbed_task::Column::Status.eq(TaskStatus::Queued.to_string()))
            .count(&txn)
            .await?;

        let from_testbed_id = task.testbed_id;
        let mut active: testbed_task::ActiveModel = task.into();
        active.testbed_id = Set(input.to_testbed_id);
        active.status = Set(TaskStatus::Queued.to_string());
        active.queue_position = Set(queued as i32 + 1);
        active.actual_start_date = Set(None);
        active.updated_at = Set(now);
        let task = active.update(&txn).await?;

        if was_in_progress {
            set_test_bed_status(&txn, from_testbed_id, TestBedStatus::Available).await?;
        }

        let transfer = testbed_task_transfer::ActiveModel {
            task_id: Set(task.id),
            from_testbed_id: Set(from_testbed_id),
            to_testbed_id: Set(input.to_testbed_id),
            reason: Set(input.reason.clone()),
            transferred_by: Set(Some(input.transferred_by.to_string())),
            transferred_at: Set(now),
            notes: Set(input.notes),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        audit::record_activity(
            &txn,
            NewActivity {
                entity_type: ENTITY_TESTBED_TASK,
                entity_id: task.id,
                action: "transferred".to_string(),
                field_name: Some("testbed_id".to_string()),
                old_value: Some(from_testbed_id.to_string()),
                new_value: Some(input.to_testbed_id.to_string()),
                reason: Some(input.reason),
                performed_by: input.transferred_by.to_string(),
                performed_at: now,
                metadata: None,
            },
        )
        .await?;

        txn.commit().await?;
        let mut views = with_job_cards(self.db.as_ref(), vec![task]).await?;
        Ok((views.remove(0), transfer))
    }

    /// 冲突检测
    ///
    /// 采用半开区间重叠判定，只考虑已占用排期的排队与进行中任务。
    /// 结果仅供排期参考。
    pub async fn check_conflicts(
        &self,
        query: ConflictQuery,
    ) -> Result<ConflictReport, ServiceError> {
        if query.start >= query.end {
            return Err(ServiceError::validation(
                "INVALID_DATE_RANGE",
                "scheduledEndDate must be after scheduledStartDate",
            ));
        }
        ensure_test_bed(self.db.as_ref(), query.testbed_id).await?;
        if let Some(employee_id) = query.employee_id {
            ensure_employee(self.db.as_ref(), employee_id).await?;
        }

        let tasks = overlapping_tasks(&query)
            .filter(testbed_task::Column::TestbedId.eq(query.testbed_id))
            .order_by_asc(testbed_task::Column::ScheduledStartDate)
            .all(self.db.as_ref())
            .await?;
        let testbed_conflicts = with_job_cards(self.db.as_ref(), tasks).await?;
        let employee_conflicts = match query.employee_id {
            Some(employee_id) => {
                let tasks = overlapping_tasks(&query)
                    .filter(testbed_task::Column::AssignedEmployeeId.eq(employee_id))
                    .order_by_asc(testbed_task::Column::ScheduledStartDate)
                    .all(self.db.as_ref())
                    .await?;
                with_job_cards(self.db.as_ref(), tasks).await?
            }
            None => Vec::new(),
        };

        let message = conflict_message(testbed_conflicts.len(), employee_conflicts.len());
        Ok(ConflictReport {
            conflicts: !testbed_conflicts.is_empty() || !employee_conflicts.is_empty(),
            testbed_conflicts,
            employee_conflicts,
            message,
        })
    }

    /// 试验台当前进行中的任务
    pub async fn current_task(&self, testbed_id: i32) -> Result<TaskView, ServiceError> {
        ensure_test_bed(self.db.as_ref(), testbed_id).await?;
        let task = testbed_task::Entity::find()
            .filter(testbed_task::Column::TestbedId.eq(testbed_id))
            .filter(testbed_task::Column::Status.eq(TaskStatus::InProgress.to_string()))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    "NO_TASK_IN_PROGRESS",
                    format!("Test bed {} has no task in progress", testbed_id),
                )
            })?;
        let mut views = with_job_cards(self.db.as_ref(), vec![task]).await?;
        Ok(views.remove(0))
    }

    /// 试验台排队队列
    ///
    /// 按队列位置排序，位置相同时按优先级（urgent、high、normal、low）
    /// 与创建时间决出先后。
    pub async fn queue(&self, testbed_id: i32) -> Result<Vec<TaskView>, ServiceError> {
        ensure_test_bed(self.db.as_ref(), testbed_id).await?;
        let tasks = testbed_task::Entity::find()
            .filter(testbed_task::Column::TestbedId.eq(testbed_id))
            .filter(testbed_task::Column::Status.eq(TaskStatus::Queued.to_string()))
            .order_by_asc(testbed_task::Column::QueuePosition)
            .order_by(priority_rank(), Order::Asc)
            .order_by_asc(testbed_task::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        let views = with_job_cards(self.db.as_ref(), tasks).await?;
        Ok(views)
    }

    /// 转移记录列表，按转移时间倒序
    pub async fn list_transfers(
        &self,
        task_id: Option<i32>,
    ) -> Result<Vec<testbed_task_transfer::Model>, ServiceError> {
        let mut query = testbed_task_transfer::Entity::find();
        if let Some(task_id) = task_id {
            query = query.filter(testbed_task_transfer::Column::TaskId.eq(task_id));
        }
        let rows = query
            .order_by_desc(testbed_task_transfer::Column::TransferredAt)
            .order_by_desc(testbed_task_transfer::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }
}

/// 优先级排序表达式，枚举值之外的脏数据排在最后
fn priority_rank() -> SimpleExpr {
    TaskPriority::ALL
        .iter()
        .fold(CaseStatement::new(), |case, priority| {
            case.case(
                Expr::col(testbed_task::Column::Priority).eq(priority.to_string()),
                Expr::val(priority.rank()),
            )
        })
        .finally(Expr::val(TaskPriority::Low.rank() + 1))
        .into()
}

fn conflict_message(testbed_count: usize, employee_count: usize) -> String {
    match (testbed_count, employee_count) {
        (0, 0) => "No scheduling conflicts detected".to_string(),
        (t, 0) => format!("Test bed has {} conflicting task(s) during this time period", t),
        (0, e) => format!("Employee has {} conflicting task(s) during this time period", e),
        (t, e) => format!(
            "Test bed has {} conflicting task(s) and employee has {} conflicting task(s) during this time period",
            t, e
        ),
    }
}

fn parse_priority(value: Option<&str>) -> Result<TaskPriority, ServiceError> {
    match value {
        None => Ok(TaskPriority::default()),
        Some(raw) => raw.parse::<TaskPriority>().map_err(|_| {
            ServiceError::validation("INVALID_PRIORITY", format!("Invalid priority: {}", raw))
        }),
    }
}

fn validate_window(
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
) -> Result<(), ServiceError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(ServiceError::validation(
                "INVALID_DATE_RANGE",
                "Scheduled start date must be before scheduled end date",
            ));
        }
    }
    Ok(())
}

async fn find_task<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<testbed_task::Model, ServiceError> {
    testbed_task::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found("TASK_NOT_FOUND", format!("Task {} not found", id))
        })
}

/// 事务内重读任务并在 Postgres 上加 FOR UPDATE 锁
///
/// SQLite 不支持行锁，由其单写事务自然串行化。
async fn find_task_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<testbed_task::Model, ServiceError> {
    let mut query = testbed_task::Entity::find_by_id(id);
    if txn.get_database_backend() == DbBackend::Postgres {
        query = query.lock(LockType::Update);
    }
    query.one(txn).await?.ok_or_else(|| {
        ServiceError::not_found("TASK_NOT_FOUND", format!("Task {} not found", id))
    })
}

async fn ensure_test_bed<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), ServiceError> {
    test_bed::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found("TESTBED_NOT_FOUND", format!("Test bed {} not found", id))
        })?;
    Ok(())
}

async fn ensure_employee<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), ServiceError> {
    employee::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found("EMPLOYEE_NOT_FOUND", format!("Employee {} not found", id))
        })?;
    Ok(())
}

async fn set_test_bed_status<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    status: TestBedStatus,
) -> Result<(), ServiceError> {
    let bed = test_bed::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found("TESTBED_NOT_FOUND", format!("Test bed {} not found", id))
        })?;
    let mut active: test_bed::ActiveModel = bed.into();
    active.status = Set(status.to_string());
    active.update(conn).await?;
    Ok(())
}

/// 首个任务启动时补写服务请求的测试开始时间
async fn stamp_testing_start<C: ConnectionTrait>(
    conn: &C,
    service_request_id: i32,
    now: DateTime<FixedOffset>,
) -> Result<(), ServiceError> {
    let sr = service_request::Entity::find_by_id(service_request_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found(
                "SERVICE_REQUEST_NOT_FOUND",
                format!("Service request {} not found", service_request_id),
            )
        })?;
    if sr.testing_start_date.is_none() {
        let mut active: service_request::ActiveModel = sr.into();
        active.testing_start_date = Set(Some(now));
        active.updated_at = Set(now);
        active.update(conn).await?;
    }
    Ok(())
}

async fn stamp_testing_end<C: ConnectionTrait>(
    conn: &C,
    service_request_id: i32,
    now: DateTime<FixedOffset>,
) -> Result<(), ServiceError> {
    let sr = service_request::Entity::find_by_id(service_request_id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found(
                "SERVICE_REQUEST_NOT_FOUND",
                format!("Service request {} not found", service_request_id),
            )
        })?;
    if sr.testing_end_date.is_none() {
        let mut active: service_request::ActiveModel = sr.into();
        active.testing_end_date = Set(Some(now));
        active.updated_at = Set(now);
        active.update(conn).await?;
    }
    Ok(())
}

/// 半开区间重叠：existing.start < end 且 existing.end > start
fn overlapping_tasks(query: &ConflictQuery) -> sea_orm::Select<testbed_task::Entity> {
    let committed = TaskStatus::ALL
        .iter()
        .filter(|status| status.is_committed())
        .map(ToString::to_string);
    let mut select = testbed_task::Entity::find()
        .filter(testbed_task::Column::Status.is_in(committed))
        .filter(testbed_task::Column::ScheduledStartDate.is_not_null())
        .filter(testbed_task::Column::ScheduledEndDate.is_not_null())
        .filter(testbed_task::Column::ScheduledStartDate.lt(query.end))
        .filter(testbed_task::Column::ScheduledEndDate.gt(query.start));
    if let Some(exclude) = query.exclude_task_id {
        select = select.filter(testbed_task::Column::Id.ne(exclude));
    }
    select
}

/// 为任务列表批量补充作业卡编号
async fn with_job_cards<C: ConnectionTrait>(
    conn: &C,
    tasks: Vec<testbed_task::Model>,
) -> Result<Vec<TaskView>, sea_orm::DbErr> {
    let mut ids: Vec<i32> = tasks.iter().map(|t| t.service_request_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let cards: HashMap<i32, String> = if ids.is_empty() {
        HashMap::new()
    } else {
        service_request::Entity::find()
            .filter(service_request::Column::Id.is_in(ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|sr| (sr.id, sr.job_card_number))
            .collect()
    };
    Ok(tasks
        .into_iter()
        .map(|task| TaskView {
            job_card_number: cards.get(&task.service_request_id).cloned(),
            task,
        })
        .collect())
}
