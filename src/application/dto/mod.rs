// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 数据传输对象
//!
//! 对外 JSON 字段统一使用 camelCase，时间为 RFC 3339 字符串。
//! 可置空字段使用双层 `Option` 区分"未携带"与"显式置空"。

pub mod audit;
pub mod service_request;
pub mod task;
pub mod test_bed;
