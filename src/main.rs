use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use bicubic_surface::app::SurfaceApp;
use bicubic_surface::cli::Cli;
use bicubic_surface::data::loader::load_table;
use bicubic_surface::data::model::SurfaceGrids;
use bicubic_surface::scene::{PlotContext, TITLE};
use bicubic_surface::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let table = load_table(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    log::info!("Loaded {} rows from {}", table.len(), cli.input.display());

    let grids = SurfaceGrids::from_table(&table).context("reshaping columns into the grid")?;
    let (z_min, z_max) = grids.z_range();
    log::info!("Grid shape {:?}, z in [{z_min}, {z_max}]", grids.shape());

    // Debug dump of the reshaped axes; nothing downstream reads it.
    println!("{}", grids.x);
    println!("{}", grids.y);

    let state = AppState::new(PlotContext::new(grids), cli.input);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([500.0, 400.0]),
        ..Default::default()
    };

    // Blocks until the window is closed.
    eframe::run_native(
        TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(SurfaceApp::new(state)))),
    )
    .map_err(|e| {
        log::error!("Display window failed: {e}");
        anyhow!("display window failed: {e}")
    })
}
