// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 应用层
//!
//! HTTP 请求/响应的数据传输对象及其到领域入参的转换。

pub mod dto;
