// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "service_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub job_card_number: String,
    pub company_id: i32,
    pub contact_person_id: Option<i32>,
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: Option<i32>,
    pub test_type: Option<String>,
    pub special_requirements: Option<String>,
    pub status: String,
    pub requested_date: Option<ChronoDateTimeWithTimeZone>,
    pub agreed_date: Option<ChronoDateTimeWithTimeZone>,
    pub material_received_date: Option<ChronoDateTimeWithTimeZone>,
    pub testing_start_date: Option<ChronoDateTimeWithTimeZone>,
    pub testing_end_date: Option<ChronoDateTimeWithTimeZone>,
    pub completion_date: Option<ChronoDateTimeWithTimeZone>,
    pub assigned_employee_id: Option<i32>,
    pub assigned_testbed_id: Option<i32>,
    pub dc_number: Option<String>,
    pub dc_verified: bool,
    pub notes: Option<String>,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
