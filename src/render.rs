// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame-to-texture conversion and crop extraction.
//!
//! The displayable path: a decoded RGB frame becomes an egui
//! `ColorImage`, the canvas letterboxes it, and polygon outlines are
//! painted over it through the display transform. Crop windows get the
//! polygon's bounding-box sub-image of the same frame.

use crate::models::frame::VideoFrame;
use crate::models::shape::Polygon;
use image::{imageops, RgbImage};

/// Convert a decoded frame into egui texture data.
pub fn color_image(frame: &VideoFrame) -> egui::ColorImage {
    egui::ColorImage::from_rgb(
        [frame.width() as usize, frame.height() as usize],
        frame.data(),
    )
}

/// Convert a cropped sub-image into egui texture data.
pub fn crop_color_image(crop: &RgbImage) -> egui::ColorImage {
    egui::ColorImage::from_rgb(
        [crop.width() as usize, crop.height() as usize],
        crop.as_raw(),
    )
}

/// A crop together with the source-frame position of its top-left corner,
/// used for the crop window title.
pub struct CropRegion {
    pub image: RgbImage,
    pub x: u32,
    pub y: u32,
}

/// Extract the axis-aligned bounding box of `polygon` from `frame`. The
/// box is clamped to the frame bounds; a crop that ends up with zero area
/// (polygon fully outside the frame) yields `None` instead of faulting.
pub fn crop_region(frame: &VideoFrame, polygon: &Polygon) -> Option<CropRegion> {
    let bbox = polygon.bounding_box();
    let width = frame.width() as f64;
    let height = frame.height() as f64;

    let min_x = bbox.min_x.floor().clamp(0.0, width) as u32;
    let min_y = bbox.min_y.floor().clamp(0.0, height) as u32;
    let max_x = bbox.max_x.ceil().clamp(0.0, width) as u32;
    let max_y = bbox.max_y.ceil().clamp(0.0, height) as u32;

    if max_x <= min_x || max_y <= min_y {
        return None;
    }

    let full = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())?;
    let image = imageops::crop_imm(&full, min_x, min_y, max_x - min_x, max_y - min_y).to_image();

    Some(CropRegion {
        image,
        x: min_x,
        y: min_y,
    })
}
