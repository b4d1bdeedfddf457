// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 服务请求相关的数据传输对象

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::Actor;
use crate::domain::services::workflow::{
    NewServiceRequest, NextJobCard, ServiceRequestFilter, ServiceRequestPatch,
};

/// 创建服务请求
///
/// 未提供编号时服务端按当日流水自动生成。
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequestRequest {
    pub job_card_number: Option<String>,
    pub company_id: i32,
    pub contact_person_id: Option<i32>,
    #[validate(length(min = 1, message = "productName is required"))]
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: Option<i32>,
    pub test_type: Option<String>,
    pub special_requirements: Option<String>,
    pub status: Option<String>,
    pub requested_date: Option<DateTime<FixedOffset>>,
    pub agreed_date: Option<DateTime<FixedOffset>>,
    pub assigned_employee_id: Option<i32>,
    pub assigned_testbed_id: Option<i32>,
    pub dc_number: Option<String>,
    pub notes: Option<String>,
    pub performed_by: Option<String>,
}

impl CreateServiceRequestRequest {
    pub fn into_input(self) -> NewServiceRequest {
        NewServiceRequest {
            job_card_number: self.job_card_number,
            company_id: self.company_id,
            contact_person_id: self.contact_person_id,
            product_name: self.product_name,
            product_description: self.product_description,
            quantity: self.quantity,
            test_type: self.test_type,
            special_requirements: self.special_requirements,
            status: self.status,
            requested_date: self.requested_date,
            agreed_date: self.agreed_date,
            assigned_employee_id: self.assigned_employee_id,
            assigned_testbed_id: self.assigned_testbed_id,
            dc_number: self.dc_number,
            notes: self.notes,
            performed_by: Actor::from_request(self.performed_by.as_deref()),
        }
    }
}

/// 更新服务请求
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequestRequest {
    pub job_card_number: Option<String>,
    pub company_id: Option<i32>,
    #[serde(default)]
    pub contact_person_id: Option<Option<i32>>,
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_description: Option<Option<String>>,
    #[serde(default)]
    pub quantity: Option<Option<i32>>,
    #[serde(default)]
    pub test_type: Option<Option<String>>,
    #[serde(default)]
    pub special_requirements: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default)]
    pub requested_date: Option<Option<DateTime<FixedOffset>>>,
    #[serde(default)]
    pub agreed_date: Option<Option<DateTime<FixedOffset>>>,
    #[serde(default)]
    pub material_received_date: Option<Option<DateTime<FixedOffset>>>,
    #[serde(default)]
    pub testing_start_date: Option<Option<DateTime<FixedOffset>>>,
    #[serde(default)]
    pub testing_end_date: Option<Option<DateTime<FixedOffset>>>,
    #[serde(default)]
    pub completion_date: Option<Option<DateTime<FixedOffset>>>,
    #[serde(default)]
    pub assigned_employee_id: Option<Option<i32>>,
    #[serde(default)]
    pub assigned_testbed_id: Option<Option<i32>>,
    #[serde(default)]
    pub dc_number: Option<Option<String>>,
    pub dc_verified: Option<bool>,
    #[serde(default)]
    pub notes: Option<Option<String>>,
    pub performed_by: Option<String>,
}

impl UpdateServiceRequestRequest {
    pub fn into_patch(self) -> (ServiceRequestPatch, Actor) {
        let actor = Actor::from_request(self.performed_by.as_deref());
        let patch = ServiceRequestPatch {
            job_card_number: self.job_card_number,
            company_id: self.company_id,
            contact_person_id: self.contact_person_id,
            product_name: self.product_name,
            product_description: self.product_description,
            quantity: self.quantity,
            test_type: self.test_type,
            special_requirements: self.special_requirements,
            status: self.status,
            requested_date: self.requested_date,
            agreed_date: self.agreed_date,
            material_received_date: self.material_received_date,
            testing_start_date: self.testing_start_date,
            testing_end_date: self.testing_end_date,
            completion_date: self.completion_date,
            assigned_employee_id: self.assigned_employee_id,
            assigned_testbed_id: self.assigned_testbed_id,
            dc_number: self.dc_number,
            dc_verified: self.dc_verified,
            notes: self.notes,
        };
        (patch, actor)
    }
}

/// 状态变更请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub status: String,
    pub notes: Option<String>,
    pub changed_by: Option<String>,
}

/// 服务请求列表查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestListQuery {
    pub status: Option<String>,
    pub company_id: Option<i32>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ServiceRequestListQuery {
    pub fn into_filter(self) -> ServiceRequestFilter {
        ServiceRequestFilter {
            status: self.status,
            company_id: self.company_id,
            search: self.search,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// 下一个委托单编号预览
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextJobCardResponse {
    pub job_card_number: String,
    pub sequence: u32,
}

impl From<NextJobCard> for NextJobCardResponse {
    fn from(next: NextJobCard) -> Self {
        Self {
            job_card_number: next.job_card_number,
            sequence: next.sequence,
        }
    }
}
