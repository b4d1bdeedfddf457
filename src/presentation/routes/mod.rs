// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use crate::domain::services::{
    AuditService, SchedulingService, TestBedService, WorkflowService,
};
use crate::presentation::handlers::{
    audit_handler, service_request_handler, task_handler, test_bed_handler,
};
use crate::utils::clock::Clock;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由，业务服务通过 Extension 注入
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route(
            "/api/test-beds",
            get(test_bed_handler::list_test_beds).post(test_bed_handler::create_test_bed),
        )
        .route(
            "/api/test-beds/{id}",
            get(test_bed_handler::get_test_bed)
                .put(test_bed_handler::update_test_bed)
                .delete(test_bed_handler::delete_test_bed),
        )
        .route("/api/test-beds/{id}/queue", get(test_bed_handler::queue))
        .route(
            "/api/test-beds/{id}/current-task",
            get(test_bed_handler::current_task),
        )
        .route(
            "/api/testbed-tasks",
            get(task_handler::list_tasks).post(task_handler::create_task),
        )
        .route(
            "/api/testbed-tasks/check-conflicts",
            post(task_handler::check_conflicts),
        )
        .route(
            "/api/testbed-tasks/{id}",
            get(task_handler::get_task)
                .put(task_handler::update_task)
                .delete(task_handler::delete_task),
        )
        .route("/api/testbed-tasks/{id}/start", post(task_handler::start_task))
        .route(
            "/api/testbed-tasks/{id}/complete",
            post(task_handler::complete_task),
        )
        .route(
            "/api/testbed-tasks/{id}/transfer",
            post(task_handler::transfer_task),
        )
        .route(
            "/api/testbed-task-transfers",
            get(task_handler::list_transfers),
        )
        .route(
            "/api/service-requests",
            get(service_request_handler::list_service_requests)
                .post(service_request_handler::create_service_request),
        )
        .route(
            "/api/job-card-next",
            get(service_request_handler::next_job_card),
        )
        .route(
            "/api/service-requests/{id}",
            get(service_request_handler::get_service_request)
                .put(service_request_handler::update_service_request)
                .delete(service_request_handler::delete_service_request),
        )
        .route(
            "/api/service-requests/{id}/status",
            post(service_request_handler::change_status),
        )
        .route(
            "/api/service-requests/{id}/history",
            get(service_request_handler::history),
        )
        .route(
            "/api/activity-logs",
            get(audit_handler::list_activity_logs).post(audit_handler::create_activity_log),
        )
        .route(
            "/api/status-history",
            get(audit_handler::list_status_history).post(audit_handler::create_status_history),
        )
        .route(
            "/api/status-history/{id}",
            get(audit_handler::get_status_history)
                .put(audit_handler::update_status_history)
                .delete(audit_handler::delete_status_history),
        );

    Router::new().merge(public_routes).merge(api_routes)
}

/// 组装完整应用
///
/// # 参数
///
/// * `db` - 数据库连接
/// * `clock` - 时钟实现，测试中可注入固定时钟
///
/// # 返回值
///
/// 注入全部业务服务并挂载请求日志层的路由
pub fn app(db: Arc<DatabaseConnection>, clock: Arc<dyn Clock>) -> Router {
    let scheduling = Arc::new(SchedulingService::new(db.clone(), clock.clone()));
    let workflow = Arc::new(WorkflowService::new(db.clone(), clock.clone()));
    let test_beds = Arc::new(TestBedService::new(db.clone(), clock.clone()));
    let audit = Arc::new(AuditService::new(db, clock));

    routes()
        .layer(Extension(scheduling))
        .layer(Extension(workflow))
        .layer(Extension(test_beds))
        .layer(Extension(audit))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
