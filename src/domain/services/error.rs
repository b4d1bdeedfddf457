// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 业务服务错误类型
//!
//! 每个业务错误携带一个稳定的机器可读错误码，供 API 层直接返回。

use sea_orm::DbErr;
use thiserror::Error;

/// 业务服务统一错误
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 请求参数不合法
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
    },

    /// 目标资源不存在
    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: String,
    },

    /// 与当前资源状态冲突
    #[error("{message}")]
    Conflict {
        code: &'static str,
        message: String,
    },

    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    /// 稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. } => code,
            Self::NotFound { code, .. } => code,
            Self::Conflict { code, .. } => code,
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// 将唯一约束冲突映射为业务冲突错误，其余数据库错误原样透传
    pub fn map_unique(err: DbErr, code: &'static str, message: impl Into<String>) -> Self {
        let text = err.to_string();
        if text.contains("UNIQUE") || text.contains("unique") || text.contains("duplicate key") {
            Self::conflict(code, message)
        } else {
            Self::Database(err)
        }
    }
}
