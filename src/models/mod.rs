// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: shapes and frames.

pub mod frame;
pub mod shape;
