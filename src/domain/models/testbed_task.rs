// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 任务状态枚举
///
/// 表示试验台任务在其生命周期中的不同状态。
/// 状态转换遵循以下流程：
/// Queued → InProgress → Completed；转移时回到 Queued；
/// 任意活动状态可被管理员置为 Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// 已入队，任务已创建但尚未开始执行
    #[default]
    Queued,
    /// 进行中，任务正在试验台上执行
    InProgress,
    /// 已完成，任务成功执行完成
    Completed,
    /// 已取消，任务被取消执行
    Cancelled,
    /// 已转移，历史遗留状态，转移后的任务实际回到 Queued
    Transferred,
}

impl TaskStatus {
    /// 全部状态值
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Queued,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
        TaskStatus::Transferred,
    ];

    /// 合法状态值列表，用于错误提示
    pub const VALID: &'static str = "queued, in_progress, completed, cancelled, transferred";

    /// 判断任务是否仍在排程中（占用冲突检测窗口）
    pub fn is_committed(&self) -> bool {
        matches!(self, TaskStatus::Queued | TaskStatus::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Queued => write!(f, "queued"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Cancelled => write!(f, "cancelled"),
            TaskStatus::Transferred => write!(f, "transferred"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(TaskStatus::Queued),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            "transferred" => Ok(TaskStatus::Transferred),
            _ => Err(()),
        }
    }
}

/// 任务优先级枚举
///
/// 队列展示顺序中优先级越高排序越靠前
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// 低优先级
    Low,
    /// 普通优先级
    #[default]
    Normal,
    /// 高优先级
    High,
    /// 紧急
    Urgent,
}

impl TaskPriority {
    /// 全部优先级值
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Urgent,
        TaskPriority::High,
        TaskPriority::Normal,
        TaskPriority::Low,
    ];

    /// 合法优先级值列表，用于错误提示
    pub const VALID: &'static str = "low, normal, high, urgent";

    /// 队列排序权重，数值越小越靠前
    pub fn rank(&self) -> i32 {
        match self {
            TaskPriority::Urgent => 1,
            TaskPriority::High => 2,
            TaskPriority::Normal => 3,
            TaskPriority::Low => 4,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Normal => write!(f, "normal"),
            TaskPriority::High => write!(f, "high"),
            TaskPriority::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "normal" => Ok(TaskPriority::Normal),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            _ => Err(()),
        }
    }
}
