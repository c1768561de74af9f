// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video source adapter.
//!
//! [`VideoSource`] wraps a stateful decoder: open once, read frames in
//! presentation order, seek by frame index. A decode read failure is
//! surfaced the same way as end-of-stream (`None`); the playback
//! controller halts either way.

use crate::models::frame::VideoFrame;
use std::path::Path;
use thiserror::Error;

/// Video open failure, reported to the user in a modal dialog. The prior
/// session (if any) is left untouched by the caller.
#[derive(Debug, Error)]
pub enum VideoOpenError {
    #[error("could not open video: {0}")]
    Decoder(String),

    #[error("no video stream found in {0}")]
    NoVideoStream(String),

    #[error("built without video support (enable the 'video-ffmpeg' feature)")]
    Unsupported,
}

/// A stateful frame decoder. Implementations maintain the current decode
/// cursor; only the playback controller holds one, so no locking is
/// needed.
pub trait VideoSource {
    /// Next frame in presentation order, or `None` at end-of-stream or on
    /// a decode failure.
    fn read_next(&mut self) -> Option<VideoFrame>;

    /// Reposition the decode cursor, clamped to `[0, frame_count - 1]`.
    /// The next `read_next` returns the frame at that index.
    fn seek(&mut self, frame_index: u32);

    /// Total decodable frames, fixed at open time.
    fn frame_count(&self) -> u32;

    /// Source frame dimensions (width, height).
    fn size(&self) -> (u32, u32);
}

/// Open a video file with the configured decoder backend.
#[cfg(feature = "video-ffmpeg")]
pub fn open(path: &Path) -> Result<Box<dyn VideoSource>, VideoOpenError> {
    let source = super::ffmpeg::FfmpegSource::open(path)?;
    Ok(Box::new(source))
}

/// Open a video file with the configured decoder backend.
#[cfg(not(feature = "video-ffmpeg"))]
pub fn open(path: &Path) -> Result<Box<dyn VideoSource>, VideoOpenError> {
    let _ = path;
    Err(VideoOpenError::Unsupported)
}

/// In-memory source producing flat-colored frames, for exercising the
/// playback controller without a decoder. Every pixel of frame `i` holds
/// the byte value `i`, so tests can tell frames apart.
#[cfg(test)]
pub struct SyntheticSource {
    width: u32,
    height: u32,
    frame_count: u32,
    cursor: u32,
    reads: usize,
}

#[cfg(test)]
impl SyntheticSource {
    pub fn new(width: u32, height: u32, frame_count: u32) -> Self {
        Self {
            width,
            height,
            frame_count,
            cursor: 0,
            reads: 0,
        }
    }

    /// Number of `read_next` calls issued so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

#[cfg(test)]
impl VideoSource for SyntheticSource {
    fn read_next(&mut self) -> Option<VideoFrame> {
        self.reads += 1;
        if self.cursor >= self.frame_count {
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        let len = self.width as usize * self.height as usize * 3;
        Some(VideoFrame::new(
            vec![index as u8; len],
            self.width,
            self.height,
            index,
        ))
    }

    fn seek(&mut self, frame_index: u32) {
        self.cursor = frame_index.min(self.frame_count.saturating_sub(1));
    }

    fn frame_count(&self) -> u32 {
        self.frame_count
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_reads_in_order() {
        let mut source = SyntheticSource::new(4, 4, 3);
        assert_eq!(source.read_next().unwrap().index(), 0);
        assert_eq!(source.read_next().unwrap().index(), 1);
        assert_eq!(source.read_next().unwrap().index(), 2);
        assert!(source.read_next().is_none());
        assert_eq!(source.reads(), 4);
    }

    #[test]
    fn test_seek_then_read_returns_target_frame() {
        // 100x100, 10 frames; seek(5) must yield frame index 5 exactly.
        let mut source = SyntheticSource::new(100, 100, 10);
        source.seek(5);
        let frame = source.read_next().unwrap();
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data()[0], 5);
    }

    #[test]
    fn test_seek_is_clamped() {
        let mut source = SyntheticSource::new(4, 4, 10);
        source.seek(9999);
        assert_eq!(source.read_next().unwrap().index(), 9);
    }
}
