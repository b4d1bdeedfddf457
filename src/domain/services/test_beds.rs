// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 试验台服务
//!
//! 试验台的增删改查。状态变更写入带新旧值的活动日志。

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::models::{Actor, TestBedStatus};
use crate::domain::services::audit::{self, NewActivity, ENTITY_TEST_BED};
use crate::domain::services::error::ServiceError;
use crate::infrastructure::database::entities::{test_bed, testbed_task};
use crate::utils::clock::Clock;

/// 新建试验台入参
#[derive(Debug, Clone)]
pub struct NewTestBed {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub performed_by: Actor,
}

/// 试验台字段更新入参
#[derive(Debug, Clone, Default)]
pub struct TestBedPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub status: Option<String>,
    pub performed_by: Actor,
}

/// 试验台列表查询条件
#[derive(Debug, Clone, Default)]
pub struct TestBedFilter {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// 单页最多返回的试验台数量
const MAX_PAGE_SIZE: u64 = 100;
const DEFAULT_PAGE_SIZE: u64 = 10;

/// 试验台服务
pub struct TestBedService {
    db: Arc<DatabaseConnection>,
    clock: Arc<dyn Clock>,
}

impl TestBedService {
    pub fn new(db: Arc<DatabaseConnection>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// 试验台列表，支持状态过滤、名称模糊检索与分页
    pub async fn list(
        &self,
        filter: TestBedFilter,
    ) -> Result<Vec<test_bed::Model>, ServiceError> {
        if let Some(status) = filter.status.as_deref() {
            parse_status(Some(status))?;
        }
        let mut query = test_bed::Entity::find();
        if let Some(search) = filter.search.as_deref() {
            query = query.filter(test_bed::Column::Name.contains(search));
        }
        if let Some(status) = filter.status {
            query = query.filter(test_bed::Column::Status.eq(status));
        }
        let rows = query
            .order_by_asc(test_bed::Column::Id)
            .limit(filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE))
            .offset(filter.offset.unwrap_or(0))
            .all(self.db.as_ref())
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<test_bed::Model, ServiceError> {
        find_test_bed(self.db.as_ref(), id).await
    }

    pub async fn create(&self, input: NewTestBed) -> Result<test_bed::Model, ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::validation(
                "MISSING_TESTBED_NAME",
                "Test bed name is required",
            ));
        }
        let status = parse_status(input.status.as_deref())?.unwrap_or_default();

        let now = self.clock.now();
        let txn = self.db.begin().await?;
        let bed = test_bed::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            location: Set(input.location),
            status: Set(status.to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        audit::record_activity(
            &txn,
            NewActivity::event(
                ENTITY_TEST_BED,
                bed.id,
                "created",
                input.performed_by.to_string(),
                now,
            ),
        )
        .await?;
        txn.commit().await?;
        Ok(bed)
    }

    /// 更新试验台
    ///
    /// 手工改动状态时记录一条带新旧值的活动日志。
    pub async fn update(
        &self,
        id: i32,
        patch: TestBedPatch,
    ) -> Result<test_bed::Model, ServiceError> {
        if let Some(status) = patch.status.as_deref() {
            parse_status(Some(status))?;
        }
        if let Some(name) = patch.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ServiceError::validation(
                    "MISSING_TESTBED_NAME",
                    "Test bed name is required",
                ));
            }
        }

        let now = self.clock.now();
        let txn = self.db.begin().await?;
        let existing = find_test_bed(&txn, id).await?;
        let old_status = existing.status.clone();

        let mut active: test_bed::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(location) = patch.location {
            active.location = Set(location);
        }
        if let Some(status) = patch.status.clone() {
            active.status = Set(status);
        }
        let bed = active.update(&txn).await?;

        if let Some(new_status) = patch.status {
            if new_status != old_status {
                audit::record_activity(
                    &txn,
                    NewActivity {
                        entity_type: ENTITY_TEST_BED,
                        entity_id: bed.id,
                        action: "status_changed".to_string(),
                        field_name: Some("status".to_string()),
                        old_value: Some(old_status),
                        new_value: Some(new_status),
                        reason: None,
                        performed_by: patch.performed_by.to_string(),
                        performed_at: now,
                        metadata: None,
                    },
                )
                .await?;
            }
        }
        txn.commit().await?;
        Ok(bed)
    }

    /// 删除试验台
    ///
    /// 存在引用它的任务时拒绝删除，历史转移记录同样构成引用。
    pub async fn delete(&self, id: i32) -> Result<test_bed::Model, ServiceError> {
        let existing = find_test_bed(self.db.as_ref(), id).await?;
        let referencing = testbed_task::Entity::find()
            .filter(testbed_task::Column::TestbedId.eq(id))
            .count(self.db.as_ref())
            .await?;
        if referencing > 0 {
            return Err(ServiceError::conflict(
                "TESTBED_HAS_TASKS",
                format!("Test bed {} is referenced by {} task(s)", id, referencing),
            ));
        }
        test_bed::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(existing)
    }
}

fn parse_status(value: Option<&str>) -> Result<Option<TestBedStatus>, ServiceError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<TestBedStatus>()
            .map(Some)
            .map_err(|_| {
                ServiceError::validation(
                    "INVALID_TESTBED_STATUS",
                    format!("Invalid test bed status: {}", raw),
                )
            }),
    }
}

async fn find_test_bed<C: sea_orm::ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<test_bed::Model, ServiceError> {
    test_bed::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| {
            ServiceError::not_found("TESTBED_NOT_FOUND", format!("Test bed {} not found", id))
        })
}
