// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 试验台占用状态枚举
///
/// `InUse` 是派生后缓存的值：当且仅当该试验台存在一个
/// in_progress 任务时为 `InUse`，否则为 `Available`；
/// `Maintenance` 是人工设置的豁免状态，同步器不会覆盖它的语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TestBedStatus {
    /// 空闲，可接受新任务启动
    #[default]
    Available,
    /// 使用中，有任务正在执行
    InUse,
    /// 维护中，人工停用
    Maintenance,
}

impl TestBedStatus {
    /// 合法状态值列表，用于错误提示
    pub const VALID: &'static str = "available, in_use, maintenance";
}

impl fmt::Display for TestBedStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TestBedStatus::Available => write!(f, "available"),
            TestBedStatus::InUse => write!(f, "in_use"),
            TestBedStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl FromStr for TestBedStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(TestBedStatus::Available),
            "in_use" => Ok(TestBedStatus::InUse),
            "maintenance" => Ok(TestBedStatus::Maintenance),
            _ => Err(()),
        }
    }
}
