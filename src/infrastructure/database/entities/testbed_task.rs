// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "testbed_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_request_id: i32,
    pub testbed_id: i32,
    pub assigned_employee_id: Option<i32>,
    pub status: String,
    pub priority: String,
    pub scheduled_start_date: Option<ChronoDateTimeWithTimeZone>,
    pub scheduled_end_date: Option<ChronoDateTimeWithTimeZone>,
    pub actual_start_date: Option<ChronoDateTimeWithTimeZone>,
    pub actual_end_date: Option<ChronoDateTimeWithTimeZone>,
    pub queue_position: i32,
    pub notes: Option<String>,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
