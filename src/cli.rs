//! Command-line arguments for the viewer and the sample generator.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bicubic-surface")]
#[command(about = "Plot an 81 × 44 x/y/z sample grid as a 3-D surface", version)]
pub struct Cli {
    /// Space-delimited `x y z` file with exactly 3564 rows and no header
    pub input: PathBuf,
}

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write the bicubic sample grid read by bicubic-surface", version)]
pub struct GenerateArgs {
    /// Output file
    #[arg(default_value = "sample_grid.txt")]
    pub output: PathBuf,
}
