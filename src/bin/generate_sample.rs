use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;

use bicubic_surface::cli::GenerateArgs;
use bicubic_surface::sample::{knot_interpolation, sample_rows, write_rows};

fn main() -> Result<()> {
    env_logger::init();
    let args = GenerateArgs::parse();

    let bicubic = knot_interpolation().context("building interpolation over the knots")?;
    let rows = sample_rows(&bicubic);

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_rows(BufWriter::new(file), &rows)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Wrote {} rows to {}", rows.len(), args.output.display());
    Ok(())
}
