// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FFmpeg decoder backend (libavformat + libavcodec via ffmpeg-next).
//!
//! Decoded frames are converted to RGB24 by the software scaler before
//! leaving this module; nothing downstream sees the codec's native pixel
//! format. Seeking lands on the nearest keyframe and decodes forward to
//! the requested index.

use crate::io::video::{VideoOpenError, VideoSource};
use crate::models::frame::VideoFrame;
use std::path::Path;

pub struct FfmpegSource {
    ictx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
    width: u32,
    height: u32,
    frame_count: u32,
    fps: f64,
    time_base: f64,
    next_index: u32,
    skip_until: Option<u32>,
    flushing: bool,
    finished: bool,
}

// The raw pointers inside ffmpeg types are never shared across threads;
// the playback controller is the sole owner.
unsafe impl Send for FfmpegSource {}

impl FfmpegSource {
    pub fn open(path: &Path) -> Result<Self, VideoOpenError> {
        ffmpeg_next::init().map_err(|e| VideoOpenError::Decoder(e.to_string()))?;

        let ictx = ffmpeg_next::format::input(path)
            .map_err(|e| VideoOpenError::Decoder(e.to_string()))?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| VideoOpenError::NoVideoStream(path.display().to_string()))?;

        let stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .map_err(|e| VideoOpenError::Decoder(e.to_string()))?;
        let decoder = codec_ctx
            .decoder()
            .video()
            .map_err(|e| VideoOpenError::Decoder(e.to_string()))?;

        let width = decoder.width();
        let height = decoder.height();

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            30.0
        };

        let tb = stream.time_base();
        let time_base = if tb.denominator() != 0 {
            tb.numerator() as f64 / tb.denominator() as f64
        } else {
            0.0
        };

        // Some containers do not carry an exact frame count; fall back to
        // duration * fps.
        let frame_count = if stream.frames() > 0 {
            stream.frames() as u32
        } else {
            (stream.duration() as f64 * time_base * fps).round().max(0.0) as u32
        };

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| VideoOpenError::Decoder(e.to_string()))?;

        log::info!(
            "opened video {} ({}x{}, {} frames, {:.2} fps)",
            path.display(),
            width,
            height,
            frame_count,
            fps
        );

        Ok(Self {
            ictx,
            decoder,
            scaler,
            stream_index,
            width,
            height,
            frame_count,
            fps,
            time_base,
            next_index: 0,
            skip_until: None,
            flushing: false,
            finished: false,
        })
    }

    /// Frame index from a decoded pts, falling back to the running
    /// counter for streams without timestamps.
    fn index_of(&self, decoded: &ffmpeg_next::util::frame::video::Video) -> u32 {
        match decoded.pts() {
            Some(pts) if self.time_base > 0.0 && self.fps > 0.0 => {
                (pts as f64 * self.time_base * self.fps).round().max(0.0) as u32
            }
            _ => self.next_index,
        }
    }

    fn try_receive(&mut self) -> Option<VideoFrame> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return None;
        }

        let mut rgb = ffmpeg_next::util::frame::video::Video::empty();
        if let Err(e) = self.scaler.run(&decoded, &mut rgb) {
            log::error!("scaler failed: {e}");
            return None;
        }

        let index = self.index_of(&decoded);
        self.next_index = index + 1;

        let pixels = extract_rgb(&rgb, self.width, self.height);
        Some(VideoFrame::new(pixels, self.width, self.height, index))
    }

    fn decode_one(&mut self) -> Option<VideoFrame> {
        if self.finished {
            return None;
        }

        if let Some(frame) = self.try_receive() {
            return Some(frame);
        }

        if self.flushing {
            self.finished = true;
            return None;
        }

        loop {
            let packet = match self.ictx.packets().next() {
                Some((stream, packet)) => {
                    if stream.index() != self.stream_index {
                        continue;
                    }
                    Some(packet)
                }
                None => None,
            };

            let Some(packet) = packet else {
                let _ = self.decoder.send_eof();
                self.flushing = true;
                if let Some(frame) = self.try_receive() {
                    return Some(frame);
                }
                self.finished = true;
                return None;
            };

            if self.decoder.send_packet(&packet).is_err() {
                continue;
            }

            if let Some(frame) = self.try_receive() {
                return Some(frame);
            }
        }
    }
}

impl VideoSource for FfmpegSource {
    fn read_next(&mut self) -> Option<VideoFrame> {
        loop {
            let frame = self.decode_one()?;
            if let Some(target) = self.skip_until {
                if frame.index() < target {
                    continue;
                }
                self.skip_until = None;
            }
            return Some(frame);
        }
    }

    fn seek(&mut self, frame_index: u32) {
        let target = frame_index.min(self.frame_count.saturating_sub(1));
        let seconds = if self.fps > 0.0 {
            target as f64 / self.fps
        } else {
            0.0
        };
        let ts = (seconds * f64::from(ffmpeg_next::ffi::AV_TIME_BASE)) as i64;

        match self.ictx.seek(ts, ..ts) {
            Ok(()) => {
                self.decoder.flush();
                self.flushing = false;
                self.finished = false;
                // Container seek lands on a keyframe at or before the
                // target; decode forward to the exact frame.
                self.skip_until = Some(target);
                self.next_index = target;
            }
            Err(e) => log::error!("seek to frame {target} failed: {e}"),
        }
    }

    fn frame_count(&self) -> u32 {
        self.frame_count
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Copy the scaler output into a tightly packed RGB buffer, dropping any
/// per-row padding ffmpeg leaves in the stride.
fn extract_rgb(frame: &ffmpeg_next::util::frame::video::Video, width: u32, height: u32) -> Vec<u8> {
    let row_len = width as usize * 3;
    let stride = frame.stride(0);
    let data = frame.data(0);

    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        pixels.extend_from_slice(&data[start..start + row_len]);
    }
    pixels
}
