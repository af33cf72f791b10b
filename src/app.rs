use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SurfaceApp {
    pub state: AppState,
}

impl SurfaceApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SurfaceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: surface ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::surface_plot(ui, &mut self.state);
        });
    }
}
