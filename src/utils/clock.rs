// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};

/// 时钟特质
///
/// 集中获取"当前时间"，使状态机与审计逻辑可以在测试中
/// 使用固定时间，保证确定性
pub trait Clock: Send + Sync {
    /// 获取当前时间
    fn now(&self) -> DateTime<FixedOffset>;
}

/// 系统时钟
///
/// 生产环境使用的时钟实现，直接读取系统时间
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().into()
    }
}

/// 固定时钟
///
/// 测试用时钟实现，始终返回构造时给定的时间
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
