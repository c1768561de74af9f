// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! LotView - Parking Lot Video Viewer
//!
//! A desktop application for reviewing parking lot footage: plays a
//! video, overlays polygonal spot regions loaded from a text file, and
//! pops up a crop window for each region.

mod app;
mod io;
mod models;
mod playback;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::LotViewApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("LotView - Parking Lot Video Viewer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "LotView",
        options,
        Box::new(|_cc| Ok(Box::new(LotViewApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
