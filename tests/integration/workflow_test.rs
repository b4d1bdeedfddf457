// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 工作流服务集成测试
//!
//! 覆盖服务请求建单、编号生成、字段级审计、状态流转与
//! 试验台占用同步。

use labrs::domain::models::Actor;
use labrs::domain::services::audit::{ActivityFilter, AuditService};
use labrs::domain::services::workflow::{
    NewServiceRequest, ServiceRequestFilter, ServiceRequestPatch, WorkflowService,
};
use labrs::infrastructure::database::entities::test_bed;
use sea_orm::EntityTrait;

use crate::common;

fn new_request(company_id: i32) -> NewServiceRequest {
    NewServiceRequest {
        job_card_number: None,
        company_id,
        contact_person_id: None,
        product_name: "RF Amplifier Unit".to_string(),
        product_description: None,
        quantity: Some(2),
        test_type: Some("thermal cycling".to_string()),
        special_requirements: None,
        status: None,
        requested_date: None,
        agreed_date: None,
        assigned_employee_id: None,
        assigned_testbed_id: None,
        dc_number: None,
        notes: None,
        performed_by: Actor::System,
    }
}

#[tokio::test]
async fn create_generates_job_card_and_audit_trail() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let audit = AuditService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;

    let created = workflow.create(new_request(company.id)).await.unwrap();
    assert_eq!(created.job_card_number, "ARTL-RF-240315-01-01-01");
    assert_eq!(created.status, "requested");

    let history = workflow.history(created.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, "requested");

    let logs = audit
        .list_activity(ActivityFilter {
            entity_type: Some("service_request".to_string()),
            entity_id: Some(created.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "created");
    let metadata: serde_json::Value =
        serde_json::from_str(logs[0].metadata.as_deref().unwrap()).unwrap();
    assert_eq!(metadata["jobCardNumber"], "ARTL-RF-240315-01-01-01");
    assert_eq!(metadata["productName"], "RF Amplifier Unit");

    // 第二单取下一个流水号
    let second = workflow.create(new_request(company.id)).await.unwrap();
    assert_eq!(second.job_card_number, "ARTL-RF-240315-02-01-01");
}

#[tokio::test]
async fn duplicate_job_card_numbers_are_rejected() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    common::seed_service_request(&db, company.id, "ARTL-RF-240315-07-01-01").await;

    let err = workflow
        .create(NewServiceRequest {
            job_card_number: Some("ARTL-RF-240315-07-01-01".to_string()),
            ..new_request(company.id)
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_JOB_CARD_NUMBER");
}

#[tokio::test]
async fn next_job_card_previews_max_plus_one_without_side_effects() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    common::seed_service_request(&db, company.id, "ARTL-RF-240315-01-01-01").await;
    common::seed_service_request(&db, company.id, "ARTL-RF-240315-03-01-01").await;

    let next = workflow.next_job_card().await.unwrap();
    assert_eq!(next.job_card_number, "ARTL-RF-240315-04-01-01");
    assert_eq!(next.sequence, 4);

    // 预览不会占用流水号
    let again = workflow.next_job_card().await.unwrap();
    assert_eq!(again.job_card_number, "ARTL-RF-240315-04-01-01");

    let rows = workflow.list(ServiceRequestFilter::default()).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn daily_job_card_limit_is_enforced() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    common::seed_service_request(&db, company.id, "ARTL-RF-240315-99-01-01").await;

    let err = workflow.next_job_card().await.unwrap_err();
    assert_eq!(err.code(), "MAX_DAILY_LIMIT_REACHED");

    let err = workflow.create(new_request(company.id)).await.unwrap_err();
    assert_eq!(err.code(), "MAX_DAILY_LIMIT_REACHED");
}

#[tokio::test]
async fn update_logs_one_activity_row_per_changed_field() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let audit = AuditService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let created = workflow.create(new_request(company.id)).await.unwrap();

    let patch = ServiceRequestPatch {
        product_name: Some("RF Amplifier Unit Mk II".to_string()),
        // 与现值相同，不应产生日志
        company_id: Some(company.id),
        notes: Some(Some("revised sample".to_string())),
        ..Default::default()
    };
    workflow
        .update(created.id, patch, Actor::Named("QA Desk".to_string()))
        .await
        .unwrap();

    let logs = audit
        .list_activity(ActivityFilter {
            entity_type: Some("service_request".to_string()),
            entity_id: Some(created.id),
            action: Some("updated".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].field_name.as_deref(), Some("product_name"));
    assert_eq!(logs[0].old_value.as_deref(), Some("RF Amplifier Unit"));
    assert_eq!(logs[0].new_value.as_deref(), Some("RF Amplifier Unit Mk II"));
    assert_eq!(logs[0].performed_by.as_deref(), Some("QA Desk"));
}

#[tokio::test]
async fn moving_to_testing_occupies_the_assigned_bed() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;

    let created = workflow
        .create(NewServiceRequest {
            assigned_testbed_id: Some(bed.id),
            ..new_request(company.id)
        })
        .await
        .unwrap();

    let updated = workflow
        .change_status(created.id, "testing".to_string(), None, Actor::System)
        .await
        .unwrap();
    assert_eq!(updated.status, "testing");
    assert_eq!(updated.testing_start_date, Some(common::test_instant()));

    let bed = test_bed::Entity::find_by_id(bed.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed.status, "in_use");

    let history = workflow.history(created.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].status, "testing");
}

#[tokio::test]
async fn completion_releases_bed_unless_another_request_is_testing() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed = common::seed_test_bed(&db, "Bed-1").await;

    let first = workflow
        .create(NewServiceRequest {
            assigned_testbed_id: Some(bed.id),
            ..new_request(company.id)
        })
        .await
        .unwrap();
    let second = workflow
        .create(NewServiceRequest {
            assigned_testbed_id: Some(bed.id),
            ..new_request(company.id)
        })
        .await
        .unwrap();

    workflow
        .change_status(first.id, "testing".to_string(), None, Actor::System)
        .await
        .unwrap();
    workflow
        .change_status(second.id, "testing".to_string(), None, Actor::System)
        .await
        .unwrap();

    // 另一单仍在测试，完成第一单不释放试验台
    workflow
        .change_status(first.id, "completed".to_string(), None, Actor::System)
        .await
        .unwrap();
    let bed_row = test_bed::Entity::find_by_id(bed.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed_row.status, "in_use");

    let completed = workflow
        .change_status(second.id, "completed".to_string(), None, Actor::System)
        .await
        .unwrap();
    assert_eq!(completed.completion_date, Some(common::test_instant()));
    assert_eq!(completed.testing_end_date, Some(common::test_instant()));

    let bed_row = test_bed::Entity::find_by_id(bed.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed_row.status, "available");
}

#[tokio::test]
async fn reassignment_releases_old_bed_regardless_of_status() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let bed_a = common::seed_test_bed(&db, "Bed-A").await;
    let bed_b = common::seed_test_bed(&db, "Bed-B").await;

    let created = workflow
        .create(NewServiceRequest {
            assigned_testbed_id: Some(bed_a.id),
            ..new_request(company.id)
        })
        .await
        .unwrap();
    workflow
        .change_status(created.id, "testing".to_string(), None, Actor::System)
        .await
        .unwrap();

    // 一次更新同时退出 testing 并改派试验台，旧台也要释放
    workflow
        .update(
            created.id,
            ServiceRequestPatch {
                status: Some("agreed".to_string()),
                assigned_testbed_id: Some(Some(bed_b.id)),
                ..Default::default()
            },
            Actor::System,
        )
        .await
        .unwrap();

    let bed_a = test_bed::Entity::find_by_id(bed_a.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed_a.status, "available");

    // 新台只有仍在测试时才被占用
    let bed_b = test_bed::Entity::find_by_id(bed_b.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bed_b.status, "available");
}

#[tokio::test]
async fn any_status_transition_is_allowed() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let created = workflow.create(new_request(company.id)).await.unwrap();

    // 只做集合成员校验，不限制流转方向
    workflow
        .change_status(created.id, "completed".to_string(), None, Actor::System)
        .await
        .unwrap();
    let back = workflow
        .change_status(created.id, "requested".to_string(), None, Actor::System)
        .await
        .unwrap();
    assert_eq!(back.status, "requested");

    let err = workflow
        .change_status(created.id, "archived".to_string(), None, Actor::System)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_STATUS");
}

#[tokio::test]
async fn list_supports_status_and_search_filters() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;

    let first = workflow.create(new_request(company.id)).await.unwrap();
    workflow
        .create(NewServiceRequest {
            product_name: "Waveguide Assembly".to_string(),
            ..new_request(company.id)
        })
        .await
        .unwrap();
    workflow
        .change_status(first.id, "testing".to_string(), None, Actor::System)
        .await
        .unwrap();

    let testing = workflow
        .list(ServiceRequestFilter {
            status: Some("testing".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(testing.len(), 1);
    assert_eq!(testing[0].id, first.id);

    let found = workflow
        .list(ServiceRequestFilter {
            search: Some("Waveguide".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].product_name, "Waveguide Assembly");
}

#[tokio::test]
async fn delete_removes_dependents_but_keeps_activity_logs() {
    let db = common::setup_db().await;
    let workflow = WorkflowService::new(db.clone(), common::fixed_clock());
    let audit = AuditService::new(db.clone(), common::fixed_clock());
    let company = common::seed_company(&db).await;
    let created = workflow.create(new_request(company.id)).await.unwrap();

    workflow.delete(created.id).await.unwrap();

    let err = workflow.get(created.id).await.unwrap_err();
    assert_eq!(err.code(), "SERVICE_REQUEST_NOT_FOUND");
    let history = audit.list_status_history(Some(created.id)).await.unwrap();
    assert!(history.is_empty());

    let logs = audit
        .list_activity(ActivityFilter {
            entity_type: Some("service_request".to_string()),
            entity_id: Some(created.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
}
