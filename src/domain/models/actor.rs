// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 操作者身份
///
/// 审计记录中的 changed_by / performed_by 字段来源。
/// 自动化转换统一归属于 `System`，避免字符串字面量散落在各处
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Actor {
    /// 系统自动操作
    #[default]
    System,
    /// 具名操作者，来自请求体
    Named(String),
}

impl Actor {
    /// 从请求中的可选操作者字段构造身份
    ///
    /// 空白字符串视为未提供，回退到 `System`
    pub fn from_request(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => Actor::Named(name.to_string()),
            _ => Actor::System,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Actor::System => write!(f, "System"),
            Actor::Named(name) => write!(f, "{}", name),
        }
    }
}
