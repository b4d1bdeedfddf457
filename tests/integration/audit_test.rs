// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 审计服务与试验台服务集成测试

use labrs::domain::models::Actor;
use labrs::domain::services::audit::{ActivityFilter, AuditService};
use labrs::domain::services::test_beds::{NewTestBed, TestBedFilter, TestBedPatch, TestBedService};

use crate::common;

#[tokio::test]
async fn manual_status_history_is_validated_and_correctable() {
    let db = common::setup_db().await;
    let audit = AuditService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    let err = audit
        .create_status_history(9999, "requested".to_string(), None, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SERVICE_REQUEST_NOT_FOUND");

    let err = audit
        .create_status_history(sr.id, "bogus".to_string(), None, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_STATUS");

    let row = audit
        .create_status_history(
            sr.id,
            "material_received".to_string(),
            Some("DC 4411 received".to_string()),
            Some("Stores".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(row.status, "material_received");

    // 只能订正备注与操作者
    let corrected = audit
        .update_status_history(row.id, Some(Some("DC 4411, 2 crates".to_string())), None)
        .await
        .unwrap();
    assert_eq!(corrected.status, "material_received");
    assert_eq!(corrected.notes.as_deref(), Some("DC 4411, 2 crates"));

    audit.delete_status_history(row.id).await.unwrap();
    let err = audit.get_status_history(row.id).await.unwrap_err();
    assert_eq!(err.code(), "STATUS_HISTORY_NOT_FOUND");
}

#[tokio::test]
async fn activity_logs_filter_by_entity_and_action() {
    let db = common::setup_db().await;
    let audit = AuditService::new(db.clone(), common::fixed_clock());

    audit
        .create_activity(
            "testbed_task".to_string(),
            1,
            "created".to_string(),
            None,
            None,
            None,
            None,
            "System".to_string(),
            None,
        )
        .await
        .unwrap();
    audit
        .create_activity(
            "service_request".to_string(),
            1,
            "created".to_string(),
            None,
            None,
            None,
            None,
            "System".to_string(),
            None,
        )
        .await
        .unwrap();

    let rows = audit
        .list_activity(ActivityFilter {
            entity_type: Some("testbed_task".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entity_type, "testbed_task");

    let rows = audit
        .list_activity(ActivityFilter {
            action: Some("deleted".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_bed_status_changes_are_logged_with_old_and_new_values() {
    let db = common::setup_db().await;
    let test_beds = TestBedService::new(db.clone(), common::fixed_clock());
    let audit = AuditService::new(db.clone(), common::fixed_clock());

    let bed = test_beds
        .create(NewTestBed {
            name: "Vibration Bed".to_string(),
            description: None,
            location: Some("Hall B".to_string()),
            status: None,
            performed_by: Actor::System,
        })
        .await
        .unwrap();
    assert_eq!(bed.status, "available");

    let updated = test_beds
        .update(
            bed.id,
            TestBedPatch {
                status: Some("maintenance".to_string()),
                performed_by: Actor::Named("Facilities".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, "maintenance");

    let logs = audit
        .list_activity(ActivityFilter {
            entity_type: Some("test_bed".to_string()),
            entity_id: Some(bed.id),
            action: Some("status_changed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].old_value.as_deref(), Some("available"));
    assert_eq!(logs[0].new_value.as_deref(), Some("maintenance"));
    assert_eq!(logs[0].performed_by.as_deref(), Some("Facilities"));
}

#[tokio::test]
async fn test_bed_list_supports_search_and_pagination() {
    let db = common::setup_db().await;
    let test_beds = TestBedService::new(db.clone(), common::fixed_clock());
    common::seed_test_bed(&db, "Vibration Bed 1").await;
    common::seed_test_bed(&db, "Vibration Bed 2").await;
    common::seed_test_bed(&db, "Thermal Chamber").await;

    let rows = test_beds
        .list(TestBedFilter {
            search: Some("Vibration".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|bed| bed.name.contains("Vibration")));

    let rows = test_beds
        .list(TestBedFilter {
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let rows = test_beds
        .list(TestBedFilter {
            limit: Some(2),
            offset: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Thermal Chamber");
}

#[tokio::test]
async fn invalid_test_bed_status_is_rejected() {
    let db = common::setup_db().await;
    let test_beds = TestBedService::new(db.clone(), common::fixed_clock());

    let err = test_beds
        .create(NewTestBed {
            name: "Bed-X".to_string(),
            description: None,
            location: None,
            status: Some("offline".to_string()),
            performed_by: Actor::System,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_TESTBED_STATUS");
}

#[tokio::test]
async fn referenced_test_beds_cannot_be_deleted() {
    let db = common::setup_db().await;
    let test_beds = TestBedService::new(db.clone(), common::fixed_clock());
    let scheduling = labrs::domain::services::SchedulingService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;
    let sr = common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;

    scheduling
        .create_task(labrs::domain::services::scheduling::NewTask {
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

    let err = test_beds.delete(bed.id).await.unwrap_err();
    assert_eq!(err.code(), "TESTBED_HAS_TASKS");
}
