// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 工作流服务
//!
//! 管理服务请求的八阶段工作流：建单、字段级变更审计、状态流转
//! 与自动时间戳，以及状态变化引发的试验台占用同步。状态校验只做
//! 集合成员检查，不限制流转方向，倒退与跳跃都允许。

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::models::job_card::{self, JobCardError};
use crate::domain::models::{Actor, TestBedStatus, WorkflowStatus};
use crate::domain::services::audit::{self, NewActivity, ENTITY_SERVICE_REQUEST};
use crate::domain::services::error::ServiceError;
use crate::infrastructure::database::entities::{
    company, contact_person, employee, service_request, status_history, test_bed, testbed_task,
};
use crate::utils::clock::Clock;

/// 新建服务请求入参
///
/// 未提供编号时按当日流水自动生成。
#[derive(Debug, Clone)]
pub struct NewServiceRequest {
    pub job_card_number: Option<String>,
    pub company_id: i32,
    pub contact_person_id: Option<i32>,
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: Option<i32>,
    pub test_type: Option<String>,
    pub special_requirements: Option<String>,
    pub status: Option<String>,
    pub requested_date: Option<DateTime<FixedOffset>>,
    pub agreed_date: Option<DateTime<FixedOffset>>,
    pub assigned_employee_id: Option<i32>,
    pub assigned_testbed_id: Option<i32>,
    pub dc_number: Option<String>,
    pub notes: Option<String>,
    pub performed_by: Actor,
}

/// 服务请求字段更新入参
///
/// 外层 `None` 表示请求未携带该字段，内层 `None` 表示显式置空。
#[derive(Debug, Clone, Default)]
pub struct ServiceRequestPatch {
    pub job_card_number: Option<String>,
    pub company_id: Option<i32>,
    pub contact_person_id: Option<Option<i32>>,
    pub product_name: Option<String>,
    pub product_description: Option<Option<String>>,
    pub quantity: Option<Option<i32>>,
    pub test_type: Option<Option<String>>,
    pub special_requirements: Option<Option<String>>,
    pub status: Option<String>,
    pub requested_date: Option<Option<DateTime<FixedOffset>>>,
    pub agreed_date: Option<Option<DateTime<FixedOffset>>>,
    pub material_received_date: Option<Option<DateTime<FixedOffset>>>,
    pub testing_start_date: Option<Option<DateTime<FixedOffset>>>,
    pub testing_end_date: Option<Option<DateTime<FixedOffset>>>,
    pub completion_date: Option<Option<DateTime<FixedOffset>>>,
    pub assigned_employee_id: Option<Option<i32>>,
    pub assigned_testbed_id: Option<Option<i32>>,
    pub dc_number: Option<Option<String>>,
    pub dc_verified: Option<bool>,
    pub notes: Option<Option<String>>,
}

/// 服务请求列表查询条件
#[derive(Debug, Clone, Default)]
pub struct ServiceRequestFilter {
    pub status: Option<String>,
    pub company_id: Option<i32>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// 预览的下一个委托单编号
#[derive(Debug, Clone)]
pub struct NextJobCard {
    pub job_card_number: String,
    pub sequence: u32,
}

/// 工作流服务
pub struct WorkflowService {
    db: Arc<DatabaseConnection>,
    clock: Arc<dyn Clock>,
}

impl WorkflowService {
    pub fn new(db: Arc<DatabaseConnection>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// 创建服务请求
    ///
    /// 同时写入初始状态历史与一条建单活动日志。编号重复映射为
    /// `DUPLICATE_JOB_CARD_NUMBER` 冲突。
    pub async fn create(
        &self,
        input: NewServiceRequest,
    ) -> Result<service_request::Model, ServiceError> {
        let status = parse_status(input.status.as_deref())?.unwrap_or_default();
        if input.product_name.trim().is_empty() {
            return Err(ServiceError::validation(
                "MISSING_PRODUCT_NAME",
                "Product name is required",
            ));
        }
        ensure_company(self.db.as_ref(), input.company_id).await?;
        if let Some(contact_person_id) = input.contact_person_id {
            ensure_contact_person(self.db.as_ref(), contact_person_id).await?;
        }
        if let Some(employee_id) = input.assigned_employee_id {
            ensure_employee(self.db.as_ref(), employee_id).await?;
        }
        if let Some(testbed_id) = input.assigned_testbed_id {
            ensure_test_bed(self.db.as_ref(), testbed_id).await?;
        }

        let now = self.clock.now();
        let txn = self.db.begin().await?;

        let job_card_number = match input.job_card_number {
            Some(number) if !number.trim().is_empty() => number,
            _ => next_number(&txn, now).await?.job_card_number,
        };

        let inserted = service_request::ActiveModel {
            job_card_number: Set(job_card_number.clone()),
            company_id: Set(input.company_id),
            contact_person_id: Set(input.contact_person_id),
            product_name: Set(input.product_name),
            product_description: Set(input.product_description),
            quantity: Set(input.quantity),
            test_type: Set(input.test_type),
            special_requirements: Set(input.special_requirements),
            status: Set(status.to_string()),
            requested_date: Set(input.requested_date),
            agreed_date: Set(input.agreed_date),
            material_received_date: Set(None),
            testing_start_date: Set(None),
            testing_end_date: Set(None),
            completion_date: Set(None),
            assigned_employee_id: Set(input.assigned_employee_id),
            assigned_testbed_id: Set(input.assigned_testbed_id),
            dc_number: Set(input.dc_number),
            dc_verified: Set(false),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|err| {
            ServiceError::map_unique(
                err,
                "DUPLICATE_JOB_CARD_NUMBER",
                format!("Job card number {} already exists", job_card_number),
            )
        })?;

        audit::record_status(
            &txn,
            inserted.id,
            &status.to_string(),
            Some("Service request created".to_string()),
            Some(input.performed_by.to_string()),
            now,
        )
        .await?;
        audit::record_activity(
            &txn,
            NewActivity {
                metadata: Some(
                    serde_json::json!({
                        "jobCardNumber": inserted.job_card_number,
                        "productName": inserted.product_name,
                    })
                    .to_string(),
                ),
                ..NewActivity::event(
                    ENTITY_SERVICE_REQUEST,
                    inserted.id,
                    "created",
                    input.performed_by.to_string(),
                    now,
                )
            },
        )
        .await?;

        txn.commit().await?;
        Ok(inserted)
    }

    pub async fn get(&self, id: i32) -> Result<service_request::Model, ServiceError> {
        find_service_request(self.db.as_ref(), id).await
    }

    /// 列表查询，支持状态、公司与编号/产品名模糊检索
    pub async fn list(
        &self,
        filter: ServiceRequestFilter,
    ) -> Result<Vec<service_request::Model>, ServiceError> {
        if let Some(status) = filter.status.as_deref() {
            parse_status(Some(status))?;
        }
        let mut query = service_request::Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(service_request::Column::Status.eq(status));
        }
        if let Some(company_id) = filter.company_id {
            query = query.filter(service_request::Column::CompanyId.eq(company_id));
        }
        if let Some(search) = filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                service_request::Column::JobCardNumber
                    .like(&pattern)
                    .or(service_request::Column::ProductName.like(&pattern)),
            );
        }
        let rows = query
            .order_by_desc(service_request::Column::CreatedAt)
            .order_by_desc(service_request::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// 更新服务请求
    ///
    /// 对受跟踪字段逐一比对，每个实际变化的字段写入一条活动日志。
    /// 状态变化附带自动时间戳、状态历史与试验台占用同步。
    pub async fn update(
        &self,
        id: i32,
        patch: ServiceRequestPatch,
        performed_by: Actor,
    ) -> Result<service_request::Model, ServiceError> {
        if let Some(status) = patch.status.as_deref() {
            parse_status(Some(status))?;
        }
        if let Some(company_id) = patch.company_id {
            ensure_company(self.db.as_ref(), company_id).await?;
        }
        if let Some(Some(contact_person_id)) = patch.contact_person_id {
            ensure_contact_person(self.db.as_ref(), contact_person_id).await?;
        }
        if let Some(Some(employee_id)) = patch.assigned_employee_id {
            ensure_employee(self.db.as_ref(), employee_id).await?;
        }
        if let Some(Some(testbed_id)) = patch.assigned_testbed_id {
            ensure_test_bed(self.db.as_ref(), testbed_id).await?;
        }

        let now = self.clock.now();
        let txn = self.db.begin().await?;
        let existing = find_service_request(&txn, id).await?;

        let old_status = existing.status.clone();
        let old_testbed_id = existing.assigned_testbed_id;
        let new_status = patch.status.clone().unwrap_or_else(|| old_status.clone());
        let new_testbed_id = match patch.assigned_testbed_id {
            Some(value) => value,
            None => old_testbed_id,
        };
        let status_changed = new_status != old_status;
        let testbed_changed = new_testbed_id != old_testbed_id;
        let new_job_card = patch.job_card_number.clone();

        // Field-level audit: one activity row per materially changed tracked field.
        let mut changes: Vec<(&'static str, Option<String>, Option<String>)> = Vec::new();
        if let Some(number) = patch.job_card_number.as_ref() {
            if *number != existing.job_card_number {
                changes.push((
                    "job_card_number",
                    Some(existing.job_card_number.clone()),
                    Some(number.clone()),
                ));
            }
        }
        if let Some(company_id) = patch.company_id {
            if company_id != existing.company_id {
                changes.push((
                    "company_id",
                    Some(existing.company_id.to_string()),
                    Some(company_id.to_string()),
                ));
            }
        }
        if let Some(contact) = patch.contact_person_id {
            if contact != existing.contact_person_id {
                changes.push((
                    "contact_person_id",
                    existing.contact_person_id.map(|v| v.to_string()),
                    contact.map(|v| v.to_string()),
                ));
            }
        }
        if let Some(name) = patch.product_name.as_ref() {
            if *name != existing.product_name {
                changes.push((
                    "product_name",
                    Some(existing.product_name.clone()),
                    Some(name.clone()),
                ));
            }
        }
        if status_changed {
            changes.push((
                "status",
                Some(old_status.clone()),
                Some(new_status.clone()),
            ));
        }
        if let Some(assigned) = patch.assigned_employee_id {
            if assigned != existing.assigned_employee_id {
                changes.push((
                    "assigned_employee_id",
                    existing.assigned_employee_id.map(|v| v.to_string()),
                    assigned.map(|v| v.to_string()),
                ));
            }
        }
        if testbed_changed {
            changes.push((
                "assigned_testbed_id",
                old_testbed_id.map(|v| v.to_string()),
                new_testbed_id.map(|v| v.to_string()),
            ));
        }

        let mut active: service_request::ActiveModel = existing.into();
        if let Some(number) = new_job_card {
            active.job_card_number = Set(number);
        }
        if let Some(company_id) = patch.company_id {
            active.company_id = Set(company_id);
        }
        if let Some(contact) = patch.contact_person_id {
            active.contact_person_id = Set(contact);
        }
        if let Some(name) = patch.product_name {
            active.product_name = Set(name);
        }
        if let Some(description) = patch.product_description {
            active.product_description = Set(description);
        }
        if let Some(quantity) = patch.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(test_type) = patch.test_type {
            active.test_type = Set(test_type);
        }
        if let Some(requirements) = patch.special_requirements {
            active.special_requirements = Set(requirements);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        if let Some(date) = patch.requested_date {
            active.requested_date = Set(date);
        }
        if let Some(date) = patch.agreed_date {
            active.agreed_date = Set(date);
        }
        if let Some(date) = patch.material_received_date {
            active.material_received_date = Set(date);
        }
        if let Some(date) = patch.testing_start_date {
            active.testing_start_date = Set(date);
        }
        if let Some(date) = patch.testing_end_date {
            active.testing_end_date = Set(date);
        }
        if let Some(date) = patch.completion_date {
            active.completion_date = Set(date);
        }
        if let Some(assigned) = patch.assigned_employee_id {
            active.assigned_employee_id = Set(assigned);
        }
        if let Some(testbed) = patch.assigned_testbed_id {
            active.assigned_testbed_id = Set(testbed);
        }
        if let Some(dc_number) = patch.dc_number {
            active.dc_number = Set(dc_number);
        }
        if let Some(dc_verified) = patch.dc_verified {
            active.dc_verified = Set(dc_verified);
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(now);
        let updated = active
            .update(&txn)
            .await
            .map_err(|err| {
                ServiceError::map_unique(
                    err,
                    "DUPLICATE_JOB_CARD_NUMBER",
                    "Job card number already exists",
                )
            })?;

        for (field, old_value, new_value) in changes {
            audit::record_activity(
                &txn,
                NewActivity {
                    entity_type: ENTITY_SERVICE_REQUEST,
                    entity_id: updated.id,
                    action: "updated".to_string(),
                    field_name: Some(field.to_string()),
                    old_value,
                    new_value,
                    reason: None,
                    performed_by: performed_by.to_string(),
                    performed_at: now,
                    metadata: None,
                },
            )
            .await?;
        }

        let updated = if status_changed {
            audit::record_status(
                &txn,
                updated.id,
                &new_status,
                None,
                Some(performed_by.to_string()),
                now,
            )
            .await?;
            apply_status_stamps(&txn, updated, &new_status, now).await?
        } else {
            updated
        };

        sync_test_beds(
            &txn,
            &updated,
            status_changed.then_some(new_status.as_str()),
            testbed_changed.then_some(old_testbed_id),
        )
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// 删除服务请求及其关联的任务、转移记录与状态历史
    ///
    /// 活动日志不随之删除，审计痕迹保留。
    pub async fn delete(&self, id: i32) -> Result<service_request::Model, ServiceError> {
        let existing = find_service_request(self.db.as_ref(), id).await?;
        let txn = self.db.begin().await?;

        let task_ids: Vec<i32> = testbed_task::Entity::find()
            .filter(testbed_task::Column::ServiceRequestId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|task| task.id)
            .collect();
        if !task_ids.is_empty() {
            use crate::infrastructure::database::entities::testbed_task_transfer;
            testbed_task_transfer::Entity::delete_many()
                .filter(testbed_task_transfer::Column::TaskId.is_in(task_ids))
                .exec(&txn)
                .await?;
            testbed_task::Entity::delete_many()
                .filter(testbed_task::Column::ServiceRequestId.eq(id))
                .exec(&txn)
                .await?;
        }
        status_history::Entity::delete_many()
            .filter(status_history::Column::ServiceRequestId.eq(id))
            .exec(&txn)
            .await?;
        service_request::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(existing)
    }

    /// 变更状态
    ///
    /// 与字段更新路径共享时间戳与试验台同步语义，额外写入一条
    /// 状态历史与一条状态字段活动日志。
    pub async fn change_status(
        &self,
        id: i32,
        status: String,
        notes: Option<String>,
        changed_by: Actor,
    ) -> Result<service_request::Model, ServiceError> {
        parse_status(Some(&status))?;

        let now = self.clock.now();
        let txn = self.db.begin().await?;
        let existing = find_service_request(&txn, id).await?;
        let old_status = existing.status.clone();

        let mut active: service_request::ActiveModel = existing.into();
        active.status = Set(status.clone());
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;
        let updated = apply_status_stamps(&txn, updated, &status, now).await?;

        audit::record_status(
            &txn,
            updated.id,
            &status,
            notes,
            Some(changed_by.to_string()),
            now,
        )
        .await?;
        if status != old_status {
            audit::record_activity(
                &txn,
                NewActivity {
                    entity_type: ENTITY_SERVICE_REQUEST,
                    entity_id: updated.id,
                    action: "updated".to_string(),
                    field_name: Some("status".to_string()),
                    old_value: Some(old_status),
                    new_value: Some(status.clone()),
                    reason: None,
                    performed_by: changed_by.to_string(),
                    performed_at: now,
                    metadata: None,
                },
            )
            .await?;
        }

        sync_test_beds(&txn, &updated, Some(status.as_str()), None).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// 服务请求的状态历史，时间正序
    pub async fn history(&self, id: i32) -> Result<Vec<status_history::Model>, ServiceError> {
        find_service_request(self.db.as_ref(), id).await?;
        let rows = status_history::Entity::find()
            .filter(status_history::Column::ServiceRequestId.eq(id))
            .order_by_asc(status_history::Column::ChangedAt)
            .order_by_asc(status_history::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// 预览下一个可用委托单编号，不产生副作用
    pub async fn next_job_card(&self) -> Result<NextJobCard, ServiceError> {
        next_number(self.db.as_ref(), self.clock.now()).await
    }
}

async fn next_number<C: ConnectionTrait>(
    conn: &C,
    now: DateTime<FixedOffset>,
) -> Result<NextJobCard, ServiceError> {
    let prefix = job_card::date_prefix(now.date_naive());
    let existing: Vec<String> = service_request::Entity::find()
        .filter(service_request::Column::JobCardNumber.like(format!("{}%", prefix)))
        .all(conn)
        .await?
        .into_iter()
        .map(|sr| sr.job_card_number)
        .collect();
    let (job_card_number, sequence) = job_card::next_job_card_number(&existing, now.date_naive())
        .map_err(|err| match err {
            JobCardError::DailyLimitReached => ServiceError::conflict(
                "MAX_DAILY_LIMIT_REACHED",
                format!(
                    "Maximum of {} job cards per day reached",
                    job_card::MAX_DAILY_SEQUENCE
                ),
            ),
        })?;
    Ok(NextJobCard {
        job_card_number,
        sequence,
    })
}

fn parse_status(value: Option<&str>) -> Result<Option<WorkflowStatus>, ServiceError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<WorkflowStatus>()
            .map(Some)
            .map_err(|_| {
                ServiceError::validation("INVALID_STATUS", format!("Invalid status: {}", raw))
            }),
    }
}

async fn find_service_request<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<service_request::Model, ServiceError> {
    service_request::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found(
                "SERVICE_REQUEST_NOT_FOUND",
                format!("Service request {} not found", id),
            )
        })
}

async fn ensure_company<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), ServiceError> {
    company::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found("COMPANY_NOT_FOUND", format!("Company {} not found", id))
        })?;
    Ok(())
}

async fn ensure_contact_person<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), ServiceError> {
    contact_person::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found(
                "CONTACT_PERSON_NOT_FOUND",
                format!("Contact person {} not found", id),
            )
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

async fn ensure_test_bed<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), ServiceError> {
    test_bed::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found("TESTBED_NOT_FOUND", format!("Test bed {} not found", id))
        })?;
    Ok(())
}

/// 状态进入 testing/completed 时补写尚未填写的时间戳
async fn apply_status_stamps<C: ConnectionTrait>(
    conn: &C,
    model: service_request::Model,
    status: &str,
    now: DateTime<FixedOffset>,
) -> Result<service_request::Model, ServiceError> {
    let testing = status == WorkflowStatus::Testing.to_string();
    let completed = status == WorkflowStatus::Completed.to_string();
    if !testing && !completed {
        return Ok(model);
    }

    let mut dirty = false;
    let mut active: service_request::ActiveModel = model.clone().into();
    if testing && model.testing_start_date.is_none() {
        active.testing_start_date = Set(Some(now));
        dirty = true;
    }
    if completed {
        if model.testing_end_date.is_none() {
            active.testing_end_date = Set(Some(now));
            dirty = true;
        }
        if model.completion_date.is_none() {
            active.completion_date = Set(Some(now));
            dirty = true;
        }
    }
    if dirty {
        Ok(active.update(conn).await?)
    } else {
        Ok(model)
    }
}

/// 状态或指派试验台变化时同步试验台占用
///
/// 改派试验台时不论当前状态都先释放旧台（仍有其他服务请求在旧台
/// 测试则保持占用）；进入 testing 时占用指派的试验台；进入
/// completed 时按同样的规则释放。
async fn sync_test_beds<C: ConnectionTrait>(
    conn: &C,
    updated: &service_request::Model,
    new_status: Option<&str>,
    old_testbed_on_change: Option<Option<i32>>,
) -> Result<(), ServiceError> {
    let testing = WorkflowStatus::Testing.to_string();
    let completed = WorkflowStatus::Completed.to_string();
    let is_testing = updated.status == testing;

    if let Some(Some(old_testbed_id)) = old_testbed_on_change {
        release_if_idle(conn, old_testbed_id, updated.id).await?;
    }

    match new_status {
        Some(status) if status == testing => {
            if let Some(testbed_id) = updated.assigned_testbed_id {
                set_test_bed_status(conn, testbed_id, TestBedStatus::InUse).await?;
            }
        }
        Some(status) if status == completed => {
            if let Some(testbed_id) = updated.assigned_testbed_id {
                release_if_idle(conn, testbed_id, updated.id).await?;
            }
        }
        _ => {
            // 状态未变但改派了试验台，且当前仍在测试中
            if old_testbed_on_change.is_some() && is_testing {
                if let Some(testbed_id) = updated.assigned_testbed_id {
                    set_test_bed_status(conn, testbed_id, TestBedStatus::InUse).await?;
                }
            }
        }
    }
    Ok(())
}

/// 若没有其他服务请求在该试验台上测试则释放
async fn release_if_idle<C: ConnectionTrait>(
    conn: &C,
    testbed_id: i32,
    except_service_request: i32,
) -> Result<(), ServiceError> {
    let still_testing = service_request::Entity::find()
        .filter(service_request::Column::AssignedTestbedId.eq(testbed_id))
        .filter(service_request::Column::Status.eq(WorkflowStatus::Testing.to_string()))
        .filter(service_request::Column::Id.ne(except_service_request))
        .one(conn)
        .await?;
    if still_testing.is_none() {
        set_test_bed_status(conn, testbed_id, TestBedStatus::Available).await?;
    }
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
