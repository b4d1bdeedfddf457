// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 业务服务
//!
//! 每个服务持有数据库连接与时钟，所有多行写入都在单个事务内完成。

pub mod audit;
pub mod error;
pub mod scheduling;
pub mod test_beds;
pub mod workflow;

pub use audit::AuditService;
pub use error::ServiceError;
pub use scheduling::SchedulingService;
pub use test_beds::TestBedService;
pub use workflow::WorkflowService;
