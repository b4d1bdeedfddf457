// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 调度服务集成测试
//!
//! 覆盖任务入队、启动、完成、转移以及队列排序的完整生命周期。

use labrs::domain::models::Actor;
use labrs::domain::services::audit::{ActivityFilter, AuditService};
use labrs::domain::services::scheduling::{NewTask, SchedulingService, TaskPatch, TransferInput};
use labrs::infrastructure::database::entities::{service_request, test_bed};
use sea_orm::EntityTrait;

use crate::common;

fn new_task(service_request_id: i32, testbed_id: i32) -> NewTask {
    NewTask {
        service_request_id,
        testbed_id,
        assigned_employee_id: None,
        priority: None,
        scheduled_start_date: None,
        scheduled_end_date: None,
        notes: None,
        performed_by: Actor::System,
    }
}

#[tokio::test]
async fn queue_positions_are_sequential_and_never_recompacted() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let first = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();
    let second = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();
    assert_eq!(first.task.queue_position, 1);
    assert_eq!(second.task.queue_position, 2);
    assert_eq!(first.job_card_number.as_deref(), Some("ARTL-RF-240315-01-01-01"));

    // 删除队首后空隙保留，剩余任务位置不变
    scheduling.delete_task(first.task.id).await.unwrap();
    let queue = scheduling.queue(bed.id).await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].task.id, second.task.id);
    assert_eq!(queue[0].task.queue_position, 2);
}

#[tokio::test]
async fn update_rewrites_fields_without_touching_the_bed() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;
    let task = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();

    let updated = scheduling
        .update_task(
            task.task.id,
            TaskPatch {
                status: Some("cancelled".to_string()),
                priority: Some("urgent".to_string()),
                queue_position: Some(5),
                notes: Some(Some("sample damaged in transit".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.task.status, "cancelled");
    assert_eq!(updated.task.priority, "urgent");
    assert_eq!(updated.task.queue_position, 5);

    // 直接改状态不同步试验台占用
    let bed = test_bed::Entity::find_by_id(bed.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed.status, "available");

    let err = scheduling
        .update_task(
            task.task.id,
            TaskPatch {
                status: Some("paused".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_STATUS");

    let err = scheduling
        .update_task(
            task.task.id,
            TaskPatch {
                queue_position: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_QUEUE_POSITION");
}

#[tokio::test]
async fn start_marks_task_bed_and_service_request() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let audit = AuditService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let task = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();
    let started = scheduling.start_task(task.task.id, Actor::System).await.unwrap();

    assert_eq!(started.task.status, "in_progress");
    assert_eq!(started.task.actual_start_date, Some(common::test_instant()));

    let bed = test_bed::Entity::find_by_id(bed.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed.status, "in_use");

    let sr = service_request::Entity::find_by_id(sr.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sr.testing_start_date, Some(common::test_instant()));

    let logs = audit
        .list_activity(ActivityFilter {
            entity_type: Some("testbed_task".to_string()),
            entity_id: Some(started.task.id),
            ..Default::default()
        })
        .await
        .unwrap();
    let actions: Vec<&str> = logs.iter().map(|l| l.action.as_str()).collect();
    assert!(actions.contains(&"created"));
    assert!(actions.contains(&"started"));
}

#[tokio::test]
async fn one_in_progress_task_per_test_bed() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let first = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();
    let second = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();

    scheduling.start_task(first.task.id, Actor::System).await.unwrap();
    let err = scheduling
        .start_task(second.task.id, Actor::System)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "TESTBED_IN_USE");
}

#[tokio::test]
async fn only_queued_tasks_can_be_started() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let task = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();
    scheduling.start_task(task.task.id, Actor::System).await.unwrap();
    let err = scheduling
        .start_task(task.task.id, Actor::System)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "TASK_NOT_QUEUED");
}

#[tokio::test]
async fn complete_releases_bed_and_stamps_end_dates() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let task = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();

    // 未启动的任务不能完成
    let err = scheduling
        .complete_task(task.task.id, Actor::System)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "TASK_NOT_IN_PROGRESS");

    scheduling.start_task(task.task.id, Actor::System).await.unwrap();
    let completed = scheduling
        .complete_task(task.task.id, Actor::System)
        .await
        .unwrap();
    assert_eq!(completed.task.status, "completed");
    assert_eq!(completed.task.actual_end_date, Some(common::test_instant()));

    let bed = test_bed::Entity::find_by_id(bed.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed.status, "available");

    let sr = service_request::Entity::find_by_id(sr.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sr.testing_end_date, Some(common::test_instant()));
}

#[tokio::test]
async fn transfer_requeues_task_and_releases_origin_bed() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let origin = common::seed_test_bed(&db, "Bed-1").await;
    let target = common::seed_test_bed(&db, "Bed-2").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let task = scheduling.create_task(new_task(sr.id, origin.id)).await.unwrap();
    scheduling.start_task(task.task.id, Actor::System).await.unwrap();

    let (moved, transfer) = scheduling
        .transfer_task(
            task.task.id,
            TransferInput {
                to_testbed_id: target.id,
                reason: "Origin bed needs maintenance".to_string(),
                transferred_by: Actor::Named("K. Rao".to_string()),
                notes: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(moved.task.testbed_id, target.id);
    assert_eq!(moved.task.status, "queued");
    assert_eq!(moved.task.queue_position, 1);
    assert_eq!(moved.task.actual_start_date, None);
    assert_eq!(transfer.from_testbed_id, origin.id);
    assert_eq!(transfer.to_testbed_id, target.id);
    assert_eq!(transfer.transferred_by.as_deref(), Some("K. Rao"));

    let origin = test_bed::Entity::find_by_id(origin.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(origin.status, "available");

    let transfers = scheduling.list_transfers(Some(moved.task.id)).await.unwrap();
    assert_eq!(transfers.len(), 1);
}

#[tokio::test]
async fn transfer_to_same_bed_is_rejected() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let task = scheduling.create_task(new_task(sr.id, bed.id)).await.unwrap();
    let err = scheduling
        .transfer_task(
            task.task.id,
            TransferInput {
                to_testbed_id: bed.id,
                reason: "no-op".to_string(),
                transferred_by: Actor::System,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SAME_TESTBED_TRANSFER");
}

#[tokio::test]
async fn completed_tasks_cannot_be_transferred() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let origin = common::seed_test_bed(&db, "Bed-1").await;
    let target = common::seed_test_bed(&db, "Bed-2").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let task = scheduling.create_task(new_task(sr.id, origin.id)).await.unwrap();
    scheduling.start_task(task.task.id, Actor::System).await.unwrap();
    scheduling.complete_task(task.task.id, Actor::System).await.unwrap();

    let err = scheduling
        .transfer_task(
            task.task.id,
            TransferInput {
                to_testbed_id: target.id,
                reason: "too late".to_string(),
                transferred_by: Actor::System,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "TASK_NOT_TRANSFERABLE");
}

#[tokio::test]
async fn queue_orders_by_position_before_priority() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let normal = scheduling
        .create_task(NewTask {
            priority: Some("normal".to_string()),
            ..new_task(sr.id, bed.id)
        })
        .await
        .unwrap();
    let urgent = scheduling
        .create_task(NewTask {
            priority: Some("urgent".to_string()),
            ..new_task(sr.id, bed.id)
        })
        .await
        .unwrap();
    let high = scheduling
        .create_task(NewTask {
            priority: Some("high".to_string()),
            ..new_task(sr.id, bed.id)
        })
        .await
        .unwrap();

    // 队列位置优先于优先级：紧急任务不插队
    let queue = scheduling.queue(bed.id).await.unwrap();
    let positions: Vec<i32> = queue.iter().map(|v| v.task.queue_position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    let ids: Vec<i32> = queue.iter().map(|v| v.task.id).collect();
    assert_eq!(ids, vec![normal.task.id, urgent.task.id, high.task.id]);

    // 位置相同时才按优先级决出先后
    scheduling
        .update_task(
            urgent.task.id,
            TaskPatch {
                queue_position: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let queue = scheduling.queue(bed.id).await.unwrap();
    let ids: Vec<i32> = queue.iter().map(|v| v.task.id).collect();
    assert_eq!(ids, vec![urgent.task.id, normal.task.id, high.task.id]);
}

#[tokio::test]
async fn current_task_reports_missing_in_progress() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let bed = common::seed_test_bed(&db, "Bed-1").await;

    let err = scheduling.current_task(bed.id).await.unwrap_err();
    assert_eq!(err.code(), "NO_TASK_IN_PROGRESS");

    let err = scheduling.current_task(9999).await.unwrap_err();
    assert_eq!(err.code(), "TESTBED_NOT_FOUND");
}

#[tokio::test]
async fn invalid_priority_and_date_range_are_rejected() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let err = scheduling
        .create_task(NewTask {
            priority: Some("asap".to_string()),
            ..new_task(sr.id, bed.id)
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_PRIORITY");

    let start = common::test_instant();
    let end = start - chrono::Duration::hours(1);
    let err = scheduling
        .create_task(NewTask {
            scheduled_start_date: Some(start),
            scheduled_end_date: Some(end),
            ..new_task(sr.id, bed.id)
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn create_validates_references() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let err = scheduling.create_task(new_task(9999, bed.id)).await.unwrap_err();
    assert_eq!(err.code(), "SERVICE_REQUEST_NOT_FOUND");

    let err = scheduling.create_task(new_task(sr.id, 9999)).await.unwrap_err();
    assert_eq!(err.code(), "TESTBED_NOT_FOUND");

    let err = scheduling
        .create_task(NewTask {
            assigned_employee_id: Some(9999),
            ..new_task(sr.id, bed.id)
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "EMPLOYEE_NOT_FOUND");
}
