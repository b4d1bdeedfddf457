// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 活动日志实体
pub mod activity_log;
/// 客户公司实体
pub mod company;
/// 联系人实体
pub mod contact_person;
/// 员工实体
pub mod employee;
/// 库存物品实体
pub mod inventory;
/// 库存日志实体
pub mod inventory_log;
/// 委托单（服务请求）实体
pub mod service_request;
/// 状态历史实体
pub mod status_history;
/// 试验台实体
pub mod test_bed;
/// 试验台任务实体
pub mod testbed_task;
/// 任务转移记录实体
pub mod testbed_task_transfer;
