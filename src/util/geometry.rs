// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the transform from source-frame pixel coordinates
//! to canvas pixel coordinates, and the fixed 16:9 canvas sizing policy.

use crate::models::shape::Point;

/// Largest 16:9 box that fits inside the available area. The display
/// canvas always keeps this shape regardless of the video's true aspect
/// ratio; the frame is letterboxed inside it.
pub fn widescreen_box(avail_width: f32, avail_height: f32) -> (f32, f32) {
    let mut width = avail_width.max(0.0);
    let mut height = width * 9.0 / 16.0;
    if height > avail_height {
        height = avail_height.max(0.0);
        width = height * 16.0 / 9.0;
    }
    (width, height)
}

/// Aspect-preserving scale plus centering offset from source-frame space
/// to canvas space. Recomputed on every render call since the canvas size
/// can change between frames; never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl DisplayTransform {
    /// Fit a `source_width` x `source_height` frame into a
    /// `canvas_width` x `canvas_height` canvas: largest rectangle of the
    /// source's aspect ratio that fits, centered on both axes.
    pub fn fit(
        source_width: u32,
        source_height: u32,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Self {
        if source_width == 0 || source_height == 0 {
            return Self {
                scale: 0.0,
                offset_x: 0.0,
                offset_y: 0.0,
            };
        }

        let sw = source_width as f64;
        let sh = source_height as f64;
        let scale = (canvas_width / sw).min(canvas_height / sh).max(0.0);

        Self {
            scale,
            offset_x: (canvas_width - sw * scale) / 2.0,
            offset_y: (canvas_height - sh * scale) / 2.0,
        }
    }

    /// Map a source-frame point into canvas coordinates.
    pub fn map(&self, point: Point) -> (f64, f64) {
        (
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    /// Size of the displayed (letterboxed) frame on the canvas.
    pub fn display_size(&self, source_width: u32, source_height: u32) -> (f64, f64) {
        (
            source_width as f64 * self.scale,
            source_height as f64 * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widescreen_box_width_limited() {
        let (w, h) = widescreen_box(1600.0, 1200.0);
        assert_eq!(w, 1600.0);
        assert_eq!(h, 900.0);
    }

    #[test]
    fn test_widescreen_box_height_limited() {
        let (w, h) = widescreen_box(1600.0, 450.0);
        assert_eq!(h, 450.0);
        assert_eq!(w, 800.0);
    }

    #[test]
    fn test_corners_stay_in_bounds() {
        let sizes = [
            (100u32, 100u32, 200.0, 200.0),
            (1920, 1080, 640.0, 480.0),
            (640, 480, 1920.0, 1080.0),
            (1280, 720, 1280.0, 720.0),
            (300, 900, 1600.0, 900.0),
        ];
        for &(sw, sh, cw, ch) in &sizes {
            let t = DisplayTransform::fit(sw, sh, cw, ch);
            let corners = [
                Point::new(0.0, 0.0),
                Point::new(sw as f64, 0.0),
                Point::new(sw as f64, sh as f64),
                Point::new(0.0, sh as f64),
            ];
            for c in corners {
                let (x, y) = t.map(c);
                assert!(x >= -1e-9 && x <= cw + 1e-9, "x {} out of [0, {}]", x, cw);
                assert!(y >= -1e-9 && y <= ch + 1e-9, "y {} out of [0, {}]", y, ch);
            }
        }
    }

    #[test]
    fn test_square_stays_square() {
        // 100x100 frame on a 200x200 canvas: scale 2, no letterbox bars.
        let t = DisplayTransform::fit(100, 100, 200.0, 200.0);
        let square = [
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(90.0, 90.0),
            Point::new(10.0, 90.0),
        ];
        let mapped: Vec<(f64, f64)> = square.iter().map(|&p| t.map(p)).collect();
        for &(x, y) in &mapped {
            assert!((0.0..200.0).contains(&x));
            assert!((0.0..200.0).contains(&y));
        }
        let side =
            |a: (f64, f64), b: (f64, f64)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
        let s0 = side(mapped[0], mapped[1]);
        let s1 = side(mapped[1], mapped[2]);
        let s2 = side(mapped[2], mapped[3]);
        let s3 = side(mapped[3], mapped[0]);
        assert!((s0 - s1).abs() < 1e-9);
        assert!((s1 - s2).abs() < 1e-9);
        assert!((s2 - s3).abs() < 1e-9);
    }

    #[test]
    fn test_letterbox_is_centered() {
        // 100x100 frame in a 300x100 canvas: bars split evenly left/right.
        let t = DisplayTransform::fit(100, 100, 300.0, 100.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.offset_x, 100.0);
        assert_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn test_zero_source_is_safe() {
        let t = DisplayTransform::fit(0, 0, 200.0, 200.0);
        let (x, y) = t.map(Point::new(50.0, 50.0));
        assert_eq!((x, y), (0.0, 0.0));
    }
}
