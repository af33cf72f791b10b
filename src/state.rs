use std::path::PathBuf;

use crate::camera::OrbitCamera;
use crate::scene::PlotContext;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Figure built from the input file. Fixed for the life of the window.
    pub plot: PlotContext,

    /// Current view onto the plot box.
    pub camera: OrbitCamera,

    /// File the grids were loaded from.
    pub source: PathBuf,
}

impl AppState {
    pub fn new(plot: PlotContext, source: PathBuf) -> Self {
        Self {
            plot,
            camera: OrbitCamera::default(),
            source,
        }
    }

    /// Back to elevation 30°, azimuth −60°.
    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// File name for display, falling back to the full path.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}
