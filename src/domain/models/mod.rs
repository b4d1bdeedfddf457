// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 领域模型
//!
//! 状态枚举、操作者标识与作业卡编号规则。

pub mod actor;
pub mod job_card;
pub mod service_request;
pub mod test_bed;
pub mod testbed_task;

pub use actor::Actor;
pub use service_request::WorkflowStatus;
pub use test_bed::TestBedStatus;
pub use testbed_task::{TaskPriority, TaskStatus};
