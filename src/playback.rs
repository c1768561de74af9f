// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback controller state machine.
//!
//! Owns the video session exclusively: the decoder handle, the single
//! current-frame slot, and the play/pause/stop/seek state. The periodic
//! advance is modelled as `tick(now)` on a fixed 30 ms interval so the
//! machine runs identically under the UI's repaint timer and under tests
//! with a synthetic clock.

use crate::io::video::VideoSource;
use crate::models::frame::VideoFrame;
use std::time::{Duration, Instant};

/// Cadence between frame advances. Nominal 30 fps regardless of the
/// source's native frame rate.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No video loaded.
    Idle,
    /// Loaded, not advancing.
    Stopped,
    /// Timer active, advancing one frame per due tick.
    Playing,
    /// Timer inactive, cursor holds position.
    Paused,
}

pub struct PlaybackController {
    source: Option<Box<dyn VideoSource>>,
    state: PlaybackState,
    frame: Option<VideoFrame>,
    last_advance: Option<Instant>,
    /// Bumped on every successful open, so the UI can tell a new session's
    /// frame 0 apart from the previous session's.
    session_id: u64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            source: None,
            state: PlaybackState::Idle,
            frame: None,
            last_advance: None,
            session_id: 0,
        }
    }

    /// Install a freshly opened source, replacing any prior session, and
    /// display its first frame. Callers only reach this on a successful
    /// open; a failed open never disturbs the running session.
    pub fn open(&mut self, mut source: Box<dyn VideoSource>) {
        source.seek(0);
        self.frame = source.read_next();
        self.source = Some(source);
        self.state = PlaybackState::Stopped;
        self.last_advance = None;
        self.session_id += 1;
        log::info!(
            "video session {} opened ({} frames)",
            self.session_id,
            self.frame_count()
        );
    }

    pub fn play(&mut self) {
        if matches!(self.state, PlaybackState::Stopped | PlaybackState::Paused) {
            self.state = PlaybackState::Playing;
            self.last_advance = None;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop playback, reset the cursor to frame 0 and redisplay it.
    pub fn stop(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        source.seek(0);
        if let Some(frame) = source.read_next() {
            self.frame = Some(frame);
        }
        self.state = PlaybackState::Stopped;
        self.last_advance = None;
    }

    /// Move the cursor to `frame_index` (clamped by the source) and
    /// display that frame once. Playback state is preserved.
    pub fn seek(&mut self, frame_index: u32) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        source.seek(frame_index);
        if let Some(frame) = source.read_next() {
            self.frame = Some(frame);
        }
        self.last_advance = None;
    }

    /// Advance one frame if playing and the cadence interval has elapsed.
    /// Returns true when the displayed frame changed. End-of-stream (or a
    /// decode failure, indistinguishable here) halts to `Stopped` with the
    /// cursor left at the last successfully read position.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        if let Some(last) = self.last_advance {
            if now.duration_since(last) < FRAME_INTERVAL {
                return false;
            }
        }

        let Some(source) = self.source.as_mut() else {
            return false;
        };
        match source.read_next() {
            Some(frame) => {
                self.frame = Some(frame);
                self.last_advance = Some(now);
                true
            }
            None => {
                log::info!("end of stream, halting playback");
                self.state = PlaybackState::Stopped;
                self.last_advance = None;
                false
            }
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Last decoded frame; overwritten on every advance or seek.
    pub fn frame(&self) -> Option<&VideoFrame> {
        self.frame.as_ref()
    }

    /// Index of the displayed frame, 0 when nothing is loaded.
    pub fn position(&self) -> u32 {
        self.frame.as_ref().map(|f| f.index()).unwrap_or(0)
    }

    pub fn frame_count(&self) -> u32 {
        self.source.as_ref().map(|s| s.frame_count()).unwrap_or(0)
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::video::SyntheticSource;

    fn opened(frames: u32) -> PlaybackController {
        let mut controller = PlaybackController::new();
        controller.open(Box::new(SyntheticSource::new(100, 100, frames)));
        controller
    }

    fn run_ticks(controller: &mut PlaybackController, count: usize) {
        let mut now = Instant::now();
        for _ in 0..count {
            now += FRAME_INTERVAL;
            controller.tick(now);
        }
    }

    #[test]
    fn test_open_shows_frame_zero() {
        let controller = opened(10);
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert_eq!(controller.position(), 0);
        assert_eq!(controller.frame_count(), 10);
    }

    #[test]
    fn test_play_advances_on_due_ticks_only() {
        let mut controller = opened(10);
        controller.play();
        assert_eq!(controller.state(), PlaybackState::Playing);

        let start = Instant::now();
        assert!(controller.tick(start), "first tick advances immediately");
        assert_eq!(controller.position(), 1);

        // Not due yet.
        assert!(!controller.tick(start + Duration::from_millis(10)));
        assert_eq!(controller.position(), 1);

        assert!(controller.tick(start + FRAME_INTERVAL));
        assert_eq!(controller.position(), 2);
    }

    #[test]
    fn test_pause_holds_position() {
        let mut controller = opened(10);
        controller.play();
        run_ticks(&mut controller, 3);
        let held = controller.position();

        controller.pause();
        assert_eq!(controller.state(), PlaybackState::Paused);
        run_ticks(&mut controller, 5);
        assert_eq!(controller.position(), held);

        controller.play();
        run_ticks(&mut controller, 1);
        assert_eq!(controller.position(), held + 1);
    }

    #[test]
    fn test_stop_resets_to_frame_zero() {
        let mut controller = opened(10);
        controller.play();
        run_ticks(&mut controller, 4);
        assert!(controller.position() > 0);

        controller.stop();
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert_eq!(controller.position(), 0);
    }

    #[test]
    fn test_seek_preserves_state_and_shows_frame() {
        let mut controller = opened(10);
        controller.seek(5);
        assert_eq!(controller.position(), 5);
        assert_eq!(controller.state(), PlaybackState::Stopped);

        controller.play();
        controller.seek(2);
        assert_eq!(controller.position(), 2);
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_end_of_stream_halts_without_reset() {
        let mut controller = opened(3);
        controller.play();
        // Frame 0 shown on open; 2 ticks reach the last frame, the next
        // hits end-of-stream.
        run_ticks(&mut controller, 3);
        assert_eq!(controller.state(), PlaybackState::Stopped);
        // Cursor stays at the last successfully read frame.
        assert_eq!(controller.position(), 2);
    }

    #[test]
    fn test_no_reads_issued_after_halt() {
        let mut controller = PlaybackController::new();
        let source = SyntheticSource::new(10, 10, 2);
        controller.open(Box::new(source));
        controller.play();
        run_ticks(&mut controller, 5);
        assert_eq!(controller.state(), PlaybackState::Stopped);

        // Once halted, further ticks must not touch the source.
        let before = controller.position();
        run_ticks(&mut controller, 10);
        assert_eq!(controller.position(), before);
        assert_eq!(controller.state(), PlaybackState::Stopped);

        // play() resumes issuing reads (immediately hits EOF again here).
        controller.play();
        run_ticks(&mut controller, 1);
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_controls_are_noops_when_idle() {
        let mut controller = PlaybackController::new();
        controller.play();
        assert_eq!(controller.state(), PlaybackState::Idle);
        controller.stop();
        controller.seek(3);
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.tick(Instant::now()));
    }
}
