// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Secondary crop windows.
//!
//! One window per loaded shape, showing the bounding-box crop of the
//! frame that was current when the shape file loaded. Windows stay open
//! until the user closes them, surviving shape resets like the originals
//! they were cut from.

/// A single crop window: static texture plus open/closed state.
pub struct CropView {
    pub id: u64,
    pub title: String,
    pub texture: egui::TextureHandle,
    pub size: egui::Vec2,
    pub open: bool,
}

/// Display all crop windows and drop the ones the user closed.
pub fn show_all(ctx: &egui::Context, views: &mut Vec<CropView>) {
    for view in views.iter_mut() {
        let mut open = view.open;
        egui::Window::new(&view.title)
            .id(egui::Id::new(("crop_window", view.id)))
            .open(&mut open)
            .resizable(true)
            .default_size(view.size)
            .show(ctx, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.image((view.texture.id(), view.size));
                });
            });
        view.open = open;
    }
    views.retain(|v| v.open);
}
