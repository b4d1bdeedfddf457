// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 冲突检测集成测试
//!
//! 验证半开区间重叠判定、范围过滤与参数校验。

use chrono::{DateTime, FixedOffset};
use labrs::domain::models::Actor;
use labrs::domain::services::scheduling::{ConflictQuery, NewTask, SchedulingService};

use crate::common;

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

fn scheduled_task(
    service_request_id: i32,
    testbed_id: i32,
    employee_id: Option<i32>,
    start: &str,
    end: &str,
) -> NewTask {
    NewTask {
        service_request_id,
        testbed_id,
        assigned_employee_id: employee_id,
        priority: None,
        scheduled_start_date: Some(at(start)),
        scheduled_end_date: Some(at(end)),
        notes: None,
        performed_by: Actor::System,
    }
}

#[tokio::test]
async fn overlapping_windows_on_same_bed_are_reported() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    scheduling
        .create_task(scheduled_task(
            sr.id,
            bed.id,
            None,
            "2024-03-20T10:00:00+00:00",
            "2024-03-20T12:00:00+00:00",
        ))
        .await
        .unwrap();

    let report = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id: bed.id,
            employee_id: None,
            start: at("2024-03-20T11:00:00+00:00"),
            end: at("2024-03-20T13:00:00+00:00"),
            exclude_task_id: None,
        })
        .await
        .unwrap();
    assert!(report.conflicts);
    assert_eq!(report.testbed_conflicts.len(), 1);
    assert!(report.employee_conflicts.is_empty());
    assert_eq!(
        report.message,
        "Test bed has 1 conflicting task(s) during this time period"
    );
}

#[tokio::test]
async fn touching_boundaries_do_not_conflict() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    scheduling
        .create_task(scheduled_task(
            sr.id,
            bed.id,
            None,
            "2024-03-20T10:00:00+00:00",
            "2024-03-20T12:00:00+00:00",
        ))
        .await
        .unwrap();

    // 上一个窗口的结束时刻即下一个的开始时刻，半开区间不算重叠
    let report = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id: bed.id,
            employee_id: None,
            start: at("2024-03-20T12:00:00+00:00"),
            end: at("2024-03-20T14:00:00+00:00"),
            exclude_task_id: None,
        })
        .await
        .unwrap();
    assert!(!report.conflicts);
    assert_eq!(report.message, "No scheduling conflicts detected");
}

#[tokio::test]
async fn only_committed_tasks_with_windows_participate() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    // 无排期窗口的任务不参与判定
    scheduling
        .create_task(NewTask {
            service_request_id: sr.id,
            testbed_id: bed.id,
            assigned_employee_id: None,
            priority: None,
            scheduled_start_date: None,
            scheduled_end_date: None,
            notes: None,
            performed_by: Actor::System,
        })
        .await
        .unwrap();

    // 已完成的任务同样不参与
    let done = scheduling
        .create_task(scheduled_task(
            sr.id,
            bed.id,
            None,
            "2024-03-20T10:00:00+00:00",
            "2024-03-20T12:00:00+00:00",
        ))
        .await
        .unwrap();
    scheduling.start_task(done.task.id, Actor::System).await.unwrap();
    scheduling.complete_task(done.task.id, Actor::System).await.unwrap();

    let report = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id: bed.id,
            employee_id: None,
            start: at("2024-03-20T10:00:00+00:00"),
            end: at("2024-03-20T12:00:00+00:00"),
            exclude_task_id: None,
        })
        .await
        .unwrap();
    assert!(!report.conflicts);
}

#[tokio::test]
async fn employee_conflicts_are_reported_separately() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed_one = common::seed_test_bed(&db, "Bed-1").await;
    let bed_two = common::seed_test_bed(&db, "Bed-2").await;
    let engineer = common::seed_employee(&db, "S Gupta").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    scheduling
        .create_task(scheduled_task(
            sr.id,
            bed_one.id,
            Some(engineer.id),
            "2024-03-20T10:00:00+00:00",
            "2024-03-20T12:00:00+00:00",
        ))
        .await
        .unwrap();

    // 同一工程师在另一试验台的同时段排期
    let report = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id: bed_two.id,
            employee_id: Some(engineer.id),
            start: at("2024-03-20T11:00:00+00:00"),
            end: at("2024-03-20T13:00:00+00:00"),
            exclude_task_id: None,
        })
        .await
        .unwrap();
    assert!(report.conflicts);
    assert!(report.testbed_conflicts.is_empty());
    assert_eq!(report.employee_conflicts.len(), 1);
    assert_eq!(
        report.message,
        "Employee has 1 conflicting task(s) during this time period"
    );
}

#[tokio::test]
async fn exclude_task_id_ignores_the_task_itself() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let task = scheduling
        .create_task(scheduled_task(
            sr.id,
            bed.id,
            None,
            "2024-03-20T10:00:00+00:00",
            "2024-03-20T12:00:00+00:00",
        ))
        .await
        .unwrap();

    let report = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id: bed.id,
            employee_id: None,
            start: at("2024-03-20T10:00:00+00:00"),
            end: at("2024-03-20T12:00:00+00:00"),
            exclude_task_id: Some(task.task.id),
        })
        .await
        .unwrap();
    assert!(!report.conflicts);
}

#[tokio::test]
async fn conflict_query_parameters_are_validated() {
    let db = common::setup_db().await;
    let scheduling = SchedulingService::new(db.clone(), common::fixed_clock());
    let bed = common::seed_test_bed(&db, "Bed-1").await;

    let err = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id: bed.id,
            employee_id: None,
            start: at("2024-03-20T12:00:00+00:00"),
            end: at("2024-03-20T10:00:00+00:00"),
            exclude_task_id: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_DATE_RANGE");

    // 引用的试验台与工程师都必须存在
    let err = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id: 9999,
            employee_id: None,
            start: at("2024-03-20T10:00:00+00:00"),
            end: at("2024-03-20T12:00:00+00:00"),
            exclude_task_id: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "TESTBED_NOT_FOUND");

    let err = scheduling
        .check_conflicts(ConflictQuery {
            testbed_id: bed.id,
            employee_id: Some(9999),
            start: at("2024-03-20T10:00:00+00:00"),
            end: at("2024-03-20T12:00:00+00:00"),
            exclude_task_id: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "EMPLOYEE_NOT_FOUND");
}
