// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 委托单工作流状态枚举
///
/// 八个阶段名义上按顺序推进，但系统只校验集合成员资格，
/// 不强制前驱顺序，允许人工修正时任意跳转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// 已提出委托
    #[default]
    Requested,
    /// 已回复客户
    Replied,
    /// 委托表已填写
    SrfFilled,
    /// 双方已确认
    Agreed,
    /// 样品已接收
    MaterialReceived,
    /// 测试进行中
    Testing,
    /// 测试已完成
    Completed,
    /// 报告已交付
    Reported,
}

impl WorkflowStatus {
    /// 合法状态值列表，用于错误提示
    pub const VALID: &'static str =
        "requested, replied, srf_filled, agreed, material_received, testing, completed, reported";
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkflowStatus::Requested => write!(f, "requested"),
            WorkflowStatus::Replied => write!(f, "replied"),
            WorkflowStatus::SrfFilled => write!(f, "srf_filled"),
            WorkflowStatus::Agreed => write!(f, "agreed"),
            WorkflowStatus::MaterialReceived => write!(f, "material_received"),
            WorkflowStatus::Testing => write!(f, "testing"),
            WorkflowStatus::Completed => write!(f, "completed"),
            WorkflowStatus::Reported => write!(f, "reported"),
        }
    }
}

impl FromStr for WorkflowStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(WorkflowStatus::Requested),
            "replied" => Ok(WorkflowStatus::Replied),
            "srf_filled" => Ok(WorkflowStatus::SrfFilled),
            "agreed" => Ok(WorkflowStatus::Agreed),
            "material_received" => Ok(WorkflowStatus::MaterialReceived),
            "testing" => Ok(WorkflowStatus::Testing),
            "completed" => Ok(WorkflowStatus::Completed),
            "reported" => Ok(WorkflowStatus::Reported),
            _ => Err(()),
        }
    }
}
