// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_directory;
mod m20260101_000002_create_test_beds;
mod m20260101_000003_create_service_requests;
mod m20260101_000004_create_testbed_tasks;
mod m20260101_000005_create_audit_logs;
mod m20260101_000006_create_inventory;
mod m20260101_000007_create_indexes;

/// 数据库迁移器
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// 获取所有迁移
    ///
    /// # 返回值
    ///
    /// 返回迁移列表
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_directory::Migration),
            Box::new(m20260101_000002_create_test_beds::Migration),
            Box::new(m20260101_000003_create_service_requests::Migration),
            Box::new(m20260101_000004_create_testbed_tasks::Migration),
            Box::new(m20260101_000005_create_audit_logs::Migration),
            Box::new(m20260101_000006_create_inventory::Migration),
            Box::new(m20260101_000007_create_indexes::Migration),
        ]
    }
}
