// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Decoded video frame buffer.
//!
//! A single decoded frame: contiguous RGB24 bytes in row-major order plus
//! its zero-based index within the video. Channel conversion happens at
//! the decoder boundary; everything downstream sees plain RGB.

/// One decoded frame. The playback controller overwrites its single frame
/// slot on every advance or seek, so consumers must copy what they need
/// before the next read.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: u32,
}

impl VideoFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * 3,
            "frame data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Zero-based index of this frame in presentation order.
    pub fn index(&self) -> u32 {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let frame = VideoFrame::new(vec![0u8; 12], 2, 2, 7);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 7);
        assert_eq!(frame.data().len(), 12);
    }
}
