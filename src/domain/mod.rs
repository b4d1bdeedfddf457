// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 领域层
//!
//! 包含核心业务模型与业务服务，不依赖具体的 Web 框架。

pub mod models;
pub mod services;
