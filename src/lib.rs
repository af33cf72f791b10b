//! Interactive 3-D surface viewer for 81 × 44 `x y z` sample grids, plus the
//! bicubic interpolator that produces them.

pub mod app;
pub mod bicubic;
pub mod camera;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod sample;
pub mod scene;
pub mod state;
pub mod ui;
