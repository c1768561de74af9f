// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Control button column.
//!
//! Load/reset and transport buttons, enabled according to the playback
//! state. Returns an action for the app to apply; no state is mutated
//! here.

use crate::playback::PlaybackState;

/// Result of control panel interaction.
pub enum ControlsAction {
    None,
    LoadVideo,
    LoadShapes,
    ResetShapes,
    Play,
    Pause,
    Stop,
}

/// Display the control buttons and report which one was clicked.
pub fn show(ui: &mut egui::Ui, state: PlaybackState, has_shapes: bool) -> ControlsAction {
    let mut action = ControlsAction::None;

    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = 6.0;

        if ui.button("Load Video").clicked() {
            action = ControlsAction::LoadVideo;
        }
        if ui.button("Load Shapes").clicked() {
            action = ControlsAction::LoadShapes;
        }
        if ui
            .add_enabled(has_shapes, egui::Button::new("Reset Shapes"))
            .clicked()
        {
            action = ControlsAction::ResetShapes;
        }

        ui.separator();

        let can_play = matches!(state, PlaybackState::Stopped | PlaybackState::Paused);
        if ui.add_enabled(can_play, egui::Button::new("▶ Play")).clicked() {
            action = ControlsAction::Play;
        }

        let can_pause = state == PlaybackState::Playing;
        if ui
            .add_enabled(can_pause, egui::Button::new("⏸ Pause"))
            .clicked()
        {
            action = ControlsAction::Pause;
        }

        let can_stop = matches!(state, PlaybackState::Playing | PlaybackState::Paused);
        if ui.add_enabled(can_stop, egui::Button::new("⏹ Stop")).clicked() {
            action = ControlsAction::Stop;
        }

        ui.separator();

        let status = match state {
            PlaybackState::Idle => "No video loaded",
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        };
        ui.label(egui::RichText::new(status).italics().weak());
    });

    action
}
