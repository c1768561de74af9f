// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video display canvas.
//!
//! The canvas keeps a fixed 16:9 shape inside the available area. The
//! current frame is letterboxed into it and every loaded shape is drawn
//! as a closed outline through the same transform, so outlines track the
//! frame across window resizes.

use crate::models::shape::ShapeSet;
use crate::util::geometry::{widescreen_box, DisplayTransform};

const OUTLINE_STROKE: f32 = 2.0;

/// Display the canvas: letterboxed frame texture plus shape outlines.
pub fn show(
    ui: &mut egui::Ui,
    frame_texture: Option<&egui::TextureHandle>,
    frame_size: Option<(u32, u32)>,
    shapes: &ShapeSet,
) {
    let available = ui.available_size();
    let (canvas_w, canvas_h) = widescreen_box(available.x, available.y);
    let (canvas_rect, _response) =
        ui.allocate_exact_size(egui::vec2(canvas_w, canvas_h), egui::Sense::hover());

    let painter = ui.painter_at(canvas_rect);
    painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(20));

    let (Some(texture), Some((frame_w, frame_h))) = (frame_texture, frame_size) else {
        // Welcome message until a video is loaded.
        painter.text(
            canvas_rect.center(),
            egui::Align2::CENTER_CENTER,
            "Load a video to begin",
            egui::FontId::proportional(18.0),
            egui::Color32::from_gray(160),
        );
        return;
    };

    let transform = DisplayTransform::fit(
        frame_w,
        frame_h,
        f64::from(canvas_rect.width()),
        f64::from(canvas_rect.height()),
    );
    let (display_w, display_h) = transform.display_size(frame_w, frame_h);

    let image_rect = egui::Rect::from_min_size(
        canvas_rect.min + egui::vec2(transform.offset_x as f32, transform.offset_y as f32),
        egui::vec2(display_w as f32, display_h as f32),
    );

    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    for polygon in shapes.iter() {
        draw_outline(&painter, canvas_rect.min, &transform, polygon);
    }
}

/// Draw one closed polygon outline in canvas space.
fn draw_outline(
    painter: &egui::Painter,
    origin: egui::Pos2,
    transform: &DisplayTransform,
    polygon: &crate::models::shape::Polygon,
) {
    let screen_points: Vec<egui::Pos2> = polygon
        .points()
        .iter()
        .map(|&p| {
            let (x, y) = transform.map(p);
            egui::pos2(origin.x + x as f32, origin.y + y as f32)
        })
        .collect();

    for i in 0..screen_points.len() {
        let next = (i + 1) % screen_points.len();
        painter.line_segment(
            [screen_points[i], screen_points[next]],
            egui::Stroke::new(OUTLINE_STROKE, egui::Color32::GREEN),
        );
    }
}
