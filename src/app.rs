// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, wiring button and slider events into the
//! playback controller and keeping the display textures in sync with
//! the controller's current frame.

use crate::io::{shapes, video};
use crate::models::shape::ShapeSet;
use crate::playback::{PlaybackController, PlaybackState, FRAME_INTERVAL};
use crate::render;
use crate::ui::{canvas, controls, crop_window};
use std::time::Instant;

/// Main application state.
pub struct LotViewApp {
    /// Playback controller; sole owner of the video session
    controller: PlaybackController,

    /// Loaded parking spot shapes, replaced wholesale on each load
    shapes: ShapeSet,

    /// Texture of the currently displayed frame
    frame_texture: Option<egui::TextureHandle>,

    /// (session, frame index) last uploaded to `frame_texture`
    shown_frame: Option<(u64, u32)>,

    /// Open crop windows, one per shape at load time
    crop_views: Vec<crop_window::CropView>,

    /// Counter for unique crop window ids
    crop_counter: u64,

    /// Seek slider position, in frames
    slider_pos: u32,

    /// True while the user is dragging the slider
    scrubbing: bool,

    /// Pending error dialog message
    error_message: Option<String>,
}

impl Default for LotViewApp {
    fn default() -> Self {
        Self::new()
    }
}

impl LotViewApp {
    /// Create a new LotView application instance.
    pub fn new() -> Self {
        Self {
            controller: PlaybackController::new(),
            shapes: ShapeSet::new(),
            frame_texture: None,
            shown_frame: None,
            crop_views: Vec::new(),
            crop_counter: 0,
            slider_pos: 0,
            scrubbing: false,
            error_message: None,
        }
    }

    fn report_error(&mut self, message: String) {
        log::error!("{message}");
        self.error_message = Some(message);
    }

    /// Pick and open a video file. On failure the prior session keeps
    /// running untouched.
    fn load_video(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Videos", &["mp4", "avi", "mov"])
            .pick_file()
        else {
            return;
        };

        match video::open(&path) {
            Ok(source) => {
                self.controller.open(source);
                self.slider_pos = 0;
                log::info!("loaded video {}", path.display());
            }
            Err(e) => self.report_error(format!("Could not open video: {e}")),
        }
    }

    /// Pick and parse a shape file. The loaded set replaces the prior one
    /// only on success; a parse error leaves it unchanged. Each loaded
    /// shape gets a crop window cut from the current frame.
    fn load_shapes(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Text Files", &["txt"])
            .pick_file()
        else {
            return;
        };

        match shapes::load(&path) {
            Ok(polygons) => {
                log::info!("loaded {} shapes from {}", polygons.len(), path.display());
                self.shapes.replace(polygons);
                self.open_crop_windows(ctx);
            }
            Err(e) => self.report_error(format!("Could not load shapes: {e}")),
        }
    }

    /// Open one crop window per loaded shape, cut from the current frame.
    /// Skipped entirely when no frame has been decoded yet; shapes whose
    /// clamped bounding box is empty get no window.
    fn open_crop_windows(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.controller.frame() else {
            return;
        };

        for polygon in self.shapes.iter() {
            let Some(crop) = render::crop_region(frame, polygon) else {
                log::info!("shape outside frame bounds, skipping crop window");
                continue;
            };

            self.crop_counter += 1;
            let texture = ctx.load_texture(
                format!("crop_{}", self.crop_counter),
                render::crop_color_image(&crop.image),
                egui::TextureOptions::LINEAR,
            );
            self.crop_views.push(crop_window::CropView {
                id: self.crop_counter,
                title: format!("Box at ({},{})", crop.x, crop.y),
                texture,
                size: egui::vec2(crop.image.width() as f32, crop.image.height() as f32),
                open: true,
            });
        }
    }

    /// Re-upload the frame texture when the displayed frame changed.
    fn sync_frame_texture(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.controller.frame() else {
            return;
        };
        let key = (self.controller.session_id(), frame.index());
        if self.shown_frame == Some(key) {
            return;
        }

        self.frame_texture = Some(ctx.load_texture(
            "video_frame",
            render::color_image(frame),
            egui::TextureOptions::LINEAR,
        ));
        self.shown_frame = Some(key);
    }

    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.error_message = None;
        }
    }
}

impl eframe::App for LotViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Advance playback and keep the repaint timer running while the
        // video plays.
        self.controller.tick(Instant::now());
        if self.controller.state() == PlaybackState::Playing {
            ctx.request_repaint_after(FRAME_INTERVAL);
        }

        self.sync_frame_texture(ctx);

        // Control buttons (left side)
        let action = egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(120.0)
            .show(ctx, |ui| controls::show(ui, self.controller.state(), !self.shapes.is_empty()))
            .inner;

        match action {
            controls::ControlsAction::LoadVideo => self.load_video(),
            controls::ControlsAction::LoadShapes => self.load_shapes(ctx),
            controls::ControlsAction::ResetShapes => {
                self.shapes.clear();
                log::info!("shapes reset");
            }
            controls::ControlsAction::Play => self.controller.play(),
            controls::ControlsAction::Pause => self.controller.pause(),
            controls::ControlsAction::Stop => self.controller.stop(),
            controls::ControlsAction::None => {}
        }

        // Seek slider (bottom)
        egui::TopBottomPanel::bottom("seek").show(ctx, |ui| {
            let frame_count = self.controller.frame_count();
            let max = frame_count.saturating_sub(1);
            let enabled = self.controller.is_open() && frame_count > 0;

            if !self.scrubbing {
                self.slider_pos = self.controller.position();
            }

            let response = ui.add_enabled(
                enabled,
                egui::Slider::new(&mut self.slider_pos, 0..=max).show_value(true),
            );
            if response.dragged() {
                self.scrubbing = true;
            }
            if response.drag_stopped() {
                self.scrubbing = false;
                self.controller.seek(self.slider_pos);
            }
        });

        // Display canvas (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            let frame_size = self.controller.frame().map(|f| (f.width(), f.height()));
            canvas::show(ui, self.frame_texture.as_ref(), frame_size, &self.shapes);
        });

        crop_window::show_all(ctx, &mut self.crop_views);

        self.show_error_dialog(ctx);
    }
}
