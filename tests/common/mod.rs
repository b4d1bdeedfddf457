// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 测试辅助工具
//!
//! 基于内存 SQLite 搭建隔离的测试环境，使用固定时钟保证确定性。

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use labrs::infrastructure::database::entities::{
    company, employee, service_request, test_bed,
};
use labrs::utils::clock::FixedClock;

/// 测试基准时间
pub const TEST_NOW: &str = "2024-03-15T09:00:00+00:00";

pub fn test_instant() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(TEST_NOW).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(test_instant()))
}

/// 建立内存数据库并执行全部迁移
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    Arc::new(db)
}

pub async fn seed_company(db: &DatabaseConnection) -> company::Model {
    company::ActiveModel {
        name: Set("Acme Propulsion Labs".to_string()),
        address: Set(Some("Industrial Area Phase 2".to_string())),
        email: Set(Some("contact@acme-propulsion.test".to_string())),
        created_at: Set(test_instant()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed company")
}

pub async fn seed_employee(db: &DatabaseConnection, name: &str) -> employee::Model {
    employee::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{}@lab.test", name.to_lowercase().replace(' ', "."))),
        designation: Set(Some("Test Engineer".to_string())),
        created_at: Set(test_instant()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed employee")
}

pub async fn seed_test_bed(db: &DatabaseConnection, name: &str) -> test_bed::Model {
    test_bed::ActiveModel {
        name: Set(name.to_string()),
        location: Set(Some("Hall A".to_string())),
        status: Set("available".to_string()),
        created_at: Set(test_instant()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed test bed")
}

/// 直接插入一条服务请求，绕过工作流服务
pub async fn seed_service_request(
    db: &DatabaseConnection,
    company_id: i32,
    job_card_number: &str,
) -> service_request::Model {
    service_request::ActiveModel {
        job_card_number: Set(job_card_number.to_string()),
        company_id: Set(company_id),
        product_name: Set("RF Amplifier Unit".to_string()),
        status: Set("requested".to_string()),
        dc_verified: Set(false),
        created_at: Set(test_instant()),
        updated_at: Set(test_instant()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed service request")
}
