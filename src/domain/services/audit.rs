// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 审计服务
//!
//! 活动日志与状态历史均为仅追加记录。写入辅助函数对
//! `ConnectionTrait` 泛型，可以在其他服务的事务内复用。

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::models::WorkflowStatus;
use crate::domain::services::error::ServiceError;
use crate::infrastructure::database::entities::{activity_log, service_request, status_history};
use crate::utils::clock::Clock;

/// 实体类型标识
pub const ENTITY_TESTBED_TASK: &str = "testbed_task";
pub const ENTITY_SERVICE_REQUEST: &str = "service_request";
pub const ENTITY_TEST_BED: &str = "test_bed";

/// 待写入的活动日志条目
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub entity_type: &'static str,
    pub entity_id: i32,
    pub action: String,
    pub field_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub reason: Option<String>,
    pub performed_by: String,
    pub performed_at: chrono::DateTime<chrono::FixedOffset>,
    pub metadata: Option<String>,
}

impl NewActivity {
    /// 构造一条不带字段粒度的生命周期事件
    pub fn event(
        entity_type: &'static str,
        entity_id: i32,
        action: impl Into<String>,
        performed_by: impl Into<String>,
        performed_at: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            action: action.into(),
            field_name: None,
            old_value: None,
            new_value: None,
            reason: None,
            performed_by: performed_by.into(),
            performed_at,
            metadata: None,
        }
    }
}

/// 在给定连接（通常是事务）上写入一条活动日志
pub async fn record_activity<C: ConnectionTrait>(
    conn: &C,
    entry: NewActivity,
) -> Result<activity_log::Model, sea_orm::DbErr> {
    activity_log::ActiveModel {
        entity_type: Set(entry.entity_type.to_string()),
        entity_id: Set(entry.entity_id),
        action: Set(entry.action),
        field_name: Set(entry.field_name),
        old_value: Set(entry.old_value),
        new_value: Set(entry.new_value),
        reason: Set(entry.reason),
        performed_by: Set(Some(entry.performed_by)),
        timestamp: Set(entry.performed_at),
        metadata: Set(entry.metadata),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// 在给定连接上写入一条状态历史
pub async fn record_status<C: ConnectionTrait>(
    conn: &C,
    service_request_id: i32,
    status: &str,
    notes: Option<String>,
    changed_by: Option<String>,
    changed_at: chrono::DateTime<chrono::FixedOffset>,
) -> Result<status_history::Model, sea_orm::DbErr> {
    status_history::ActiveModel {
        service_request_id: Set(service_request_id),
        status: Set(status.to_string()),
        notes: Set(notes),
        changed_by: Set(changed_by),
        changed_at: Set(changed_at),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// 活动日志查询条件
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<i32>,
    pub action: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// 审计服务
pub struct AuditService {
    db: Arc<DatabaseConnection>,
    clock: Arc<dyn Clock>,
}

impl AuditService {
    pub fn new(db: Arc<DatabaseConnection>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// 查询活动日志，按时间倒序
    pub async fn list_activity(
        &self,
        filter: ActivityFilter,
    ) -> Result<Vec<activity_log::Model>, ServiceError> {
        let mut query = activity_log::Entity::find();
        if let Some(entity_type) = filter.entity_type {
            query = query.filter(activity_log::Column::EntityType.eq(entity_type));
        }
        if let Some(entity_id) = filter.entity_id {
            query = query.filter(activity_log::Column::EntityId.eq(entity_id));
        }
        if let Some(action) = filter.action {
            query = query.filter(activity_log::Column::Action.eq(action));
        }
        let rows = query
            .order_by_desc(activity_log::Column::Timestamp)
            .order_by_desc(activity_log::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    /// 手工补录一条活动日志
    pub async fn create_activity(
        &self,
        entity_type: String,
        entity_id: i32,
        action: String,
        field_name: Option<String>,
        old_value: Option<String>,
        new_value: Option<String>,
        reason: Option<String>,
        performed_by: String,
        metadata: Option<String>,
    ) -> Result<activity_log::Model, ServiceError> {
        let row = activity_log::ActiveModel {
            entity_type: Set(entity_type),
            entity_id: Set(entity_id),
            action: Set(action),
            field_name: Set(field_name),
            old_value: Set(old_value),
            new_value: Set(new_value),
            reason: Set(reason),
            performed_by: Set(Some(performed_by)),
            timestamp: Set(self.clock.now()),
            metadata: Set(metadata),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(row)
    }

    /// 查询状态历史
    ///
    /// 按服务请求过滤时返回时间正序，便于还原流转过程。
    pub async fn list_status_history(
        &self,
        service_request_id: Option<i32>,
    ) -> Result<Vec<status_history::Model>, ServiceError> {
        let mut query = status_history::Entity::find();
        if let Some(id) = service_request_id {
            query = query.filter(status_history::Column::ServiceRequestId.eq(id));
        }
        let rows = query
            .order_by_asc(status_history::Column::ChangedAt)
            .order_by_asc(status_history::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    pub async fn get_status_history(
        &self,
        id: i32,
    ) -> Result<status_history::Model, ServiceError> {
        status_history::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    "STATUS_HISTORY_NOT_FOUND",
                    format!("Status history entry {} not found", id),
                )
            })
    }

    /// 手工补录一条状态历史
    pub async fn create_status_history(
        &self,
        service_request_id: i32,
        status: String,
        notes: Option<String>,
        changed_by: Option<String>,
    ) -> Result<status_history::Model, ServiceError> {
        if status.parse::<WorkflowStatus>().is_err() {
            return Err(ServiceError::validation(
                "INVALID_STATUS",
                format!("Invalid status: {}", status),
            ));
        }
        service_request::Entity::find_by_id(service_request_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    "SERVICE_REQUEST_NOT_FOUND",
                    format!("Service request {} not found", service_request_id),
                )
            })?;
        let row = record_status(
            self.db.as_ref(),
            service_request_id,
            &status,
            notes,
            changed_by,
            self.clock.now(),
        )
        .await?;
        Ok(row)
    }

    /// 订正一条状态历史的备注或操作者
    ///
    /// 状态与所属服务请求不可改动，历史本身保持仅追加语义。
    pub async fn update_status_history(
        &self,
        id: i32,
        notes: Option<Option<String>>,
        changed_by: Option<Option<String>>,
    ) -> Result<status_history::Model, ServiceError> {
        let existing = self.get_status_history(id).await?;
        let mut active: status_history::ActiveModel = existing.into();
        if let Some(notes) = notes {
            active.notes = Set(notes);
        }
        if let Some(changed_by) = changed_by {
            active.changed_by = Set(changed_by);
        }
        let row = active.update(self.db.as_ref()).await?;
        Ok(row)
    }

    pub async fn delete_status_history(
        &self,
        id: i32,
    ) -> Result<status_history::Model, ServiceError> {
        let existing = self.get_status_history(id).await?;
        status_history::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(existing)
    }
}
