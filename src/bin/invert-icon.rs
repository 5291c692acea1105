use anyhow::{Context, Result};
use clap::Parser;
use ifc_icons::export::invert_image_color;
use std::path::PathBuf;

/// Invert the colors of PNG icons, keeping their transparency.
#[derive(Parser, Debug)]
#[command(name = "invert-icon", version, about = "Invert the RGB channels of PNG icons")]
struct Cli {
    /// PNG files to invert
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Suffix added to the file stem of the inverted copy; empty overwrites the input
    #[arg(long, default_value = "")]
    suffix: String,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    for path in &args.paths {
        let out = invert_image_color(path, &args.suffix)
            .with_context(|| format!("Failed to invert {}", path.display()))?;
        println!("{}", out.display());
    }
    Ok(())
}
