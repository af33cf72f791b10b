use eframe::egui::{self, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("View", |ui: &mut Ui| {
            if ui.button("Reset view").clicked() {
                state.reset_view();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.source_name());

        ui.separator();
        let (rows, cols) = state.plot.grids.shape();
        let (z_min, z_max) = state.plot.grids.z_range();
        ui.label(format!(
            "{rows} × {cols} grid, z ∈ [{z_min:.3}, {z_max:.3}], {} faces",
            state.plot.faces().len()
        ));

        ui.separator();
        ui.label(format!(
            "elev {:.0}°, azim {:.0}°",
            state.camera.elevation, state.camera.azimuth
        ))
        .on_hover_text("Drag to rotate, scroll to zoom, double-click to reset");
    });
}
