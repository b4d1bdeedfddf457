// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod audit_handler;
pub mod service_request_handler;
pub mod task_handler;
pub mod test_bed_handler;
