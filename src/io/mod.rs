// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for video and shape files.

#[cfg(feature = "video-ffmpeg")]
pub mod ffmpeg;
pub mod shapes;
pub mod video;
