// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod audit_test;
pub mod conflict_test;
pub mod scheduling_test;
pub mod workflow_test;
