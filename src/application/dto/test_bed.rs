// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 试验台相关的数据传输对象

use serde::Deserialize;
use validator::Validate;

use crate::domain::models::Actor;
use crate::domain::services::test_beds::{NewTestBed, TestBedFilter, TestBedPatch};

/// 创建试验台请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestBedRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub performed_by: Option<String>,
}

impl CreateTestBedRequest {
    pub fn into_input(self) -> NewTestBed {
        NewTestBed {
            name: self.name,
            description: self.description,
            location: self.location,
            status: self.status,
            performed_by: Actor::from_request(self.performed_by.as_deref()),
        }
    }
}

/// 更新试验台请求
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestBedRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub location: Option<Option<String>>,
    pub status: Option<String>,
    pub performed_by: Option<String>,
}

impl UpdateTestBedRequest {
    pub fn into_patch(self) -> TestBedPatch {
        TestBedPatch {
            name: self.name,
            description: self.description,
            location: self.location,
            status: self.status,
            performed_by: Actor::from_request(self.performed_by.as_deref()),
        }
    }
}

/// 试验台列表查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestBedListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl TestBedListQuery {
    pub fn into_filter(self) -> TestBedFilter {
        TestBedFilter {
            status: self.status,
            search: self.search,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
