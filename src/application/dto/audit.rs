// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 审计记录相关的数据传输对象

use serde::Deserialize;

use crate::domain::services::audit::ActivityFilter;

/// 活动日志列表查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<i32>,
    pub action: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ActivityLogQuery {
    pub fn into_filter(self) -> ActivityFilter {
        ActivityFilter {
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            action: self.action,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// 手工补录活动日志请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityLogRequest {
    pub entity_type: String,
    pub entity_id: i32,
    pub action: String,
    pub field_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub reason: Option<String>,
    pub performed_by: Option<String>,
    pub metadata: Option<String>,
}

/// 状态历史列表查询参数
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryListQuery {
    pub service_request_id: Option<i32>,
}

/// 手工补录状态历史请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStatusHistoryRequest {
    pub service_request_id: i32,
    pub status: String,
    pub notes: Option<String>,
    pub changed_by: Option<String>,
}

/// 订正状态历史请求
///
/// 只允许修改备注与操作者。
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusHistoryRequest {
    #[serde(default)]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub changed_by: Option<Option<String>>,
}
