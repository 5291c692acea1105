use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use ifc_icons::augment::augment_all;
use ifc_icons::config::Config;
use ifc_icons::export::{match_icons, save_ifc_icons, ExportOptions};
use ifc_icons::fetch::Fetcher;
use ifc_icons::logging;
use ifc_icons::manifest;
use ifc_icons::mapping::{load_icon_mapping, write_icon_mapping};
use ifc_icons::material::{IconSize, IconStyle, IconZoom};
use ifc_icons::schema::load_schemas;

#[derive(Parser)]
#[command(name = "ifc_icons")]
#[command(about = "Assign Material Design icons to IFC classes")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ifc_icons.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Propagate icons from base IFC classes to all of their subtypes
    Augment {
        /// EXPRESS schema files or directories containing *.exp files
        #[arg(long = "schemas", num_args = 1..)]
        schemas: Vec<PathBuf>,
        /// Hand-assigned icons (ifc-icons.json)
        #[arg(long)]
        icons: Option<PathBuf>,
        /// Where to write the augmented mapping (ifc-full-icons.json)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Entity the traversal starts from
        #[arg(long)]
        root: Option<String>,
    },
    /// Copy matching Material Design PNGs into the output folder
    Export {
        #[command(flatten)]
        icons: IconArgs,
        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,
        /// Keep existing files in the output directory
        #[arg(long)]
        no_overwrite: bool,
        /// Copy icons without inverting their colors
        #[arg(long)]
        no_invert: bool,
    },
    /// Show which Material Design icon each IFC class resolves to
    List {
        #[command(flatten)]
        icons: IconArgs,
        /// Only show classes without a matching icon
        #[arg(long)]
        missing: bool,
    },
    /// Download an icon mapping file
    Fetch {
        /// Fetch the augmented mapping with every subtype (default)
        #[arg(long, conflicts_with = "base")]
        full: bool,
        /// Fetch the hand-assigned base mapping instead of the full one
        #[arg(long)]
        base: bool,
        /// Override the download URL
        #[arg(long)]
        url: Option<String>,
        /// Destination file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check exported icons against their manifest
    Verify {
        /// Directory holding the exported icons
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct IconArgs {
    /// Checkout of google/material-design-icons
    #[arg(long)]
    mdi: Option<PathBuf>,
    /// IFC class to icon mapping (ifc-full-icons.json)
    #[arg(long)]
    mapping: Option<PathBuf>,
    #[arg(long, value_enum)]
    style: Option<IconStyle>,
    #[arg(long, value_enum)]
    size: Option<IconSize>,
    #[arg(long, value_enum)]
    zoom: Option<IconZoom>,
}

impl IconArgs {
    /// Flags win over config values
    fn into_options(self, config: &Config) -> ExportOptions {
        ExportOptions {
            material_icons_root: self
                .mdi
                .unwrap_or_else(|| config.paths.material_design_icons.clone()),
            mapping_file: self
                .mapping
                .unwrap_or_else(|| config.paths.full_icons.clone()),
            save_path: config.paths.output.clone(),
            style: self.style.unwrap_or(config.export.style),
            size: self.size.unwrap_or(config.export.size),
            zoom: self.zoom.unwrap_or(config.export.zoom),
            overwrite: config.export.overwrite,
            invert_colors: config.export.invert_colors,
        }
    }
}

fn export_options(
    icons: IconArgs,
    output: Option<PathBuf>,
    no_overwrite: bool,
    no_invert: bool,
    config: &Config,
) -> ExportOptions {
    let mut options = icons.into_options(config);
    if let Some(output) = output {
        options.save_path = output;
    }
    options.overwrite &= !no_overwrite;
    options.invert_colors &= !no_invert;
    options
}

/// URL and destination for `fetch`
fn fetch_target(
    base: bool,
    url: Option<String>,
    output: Option<PathBuf>,
    config: &Config,
) -> (String, PathBuf) {
    let (default_url, default_output) = if base {
        (&config.fetch.base_icons_url, &config.paths.base_icons)
    } else {
        (&config.fetch.full_icons_url, &config.paths.full_icons)
    };
    (
        url.unwrap_or_else(|| default_url.clone()),
        output.unwrap_or_else(|| default_output.clone()),
    )
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let guard = logging::init_logging(&config.paths.logs, cli.verbose);

    match cli.command {
        Commands::Augment {
            schemas,
            icons,
            output,
            root,
        } => {
            let schema_paths = if schemas.is_empty() {
                vec![config.paths.schemas.clone()]
            } else {
                schemas
            };
            let icons_path = icons.unwrap_or_else(|| config.paths.base_icons.clone());
            let output = output.unwrap_or_else(|| config.paths.full_icons.clone());
            let root = root.unwrap_or_else(|| config.augment.root.clone());

            let schemas = load_schemas(&schema_paths).context("Failed to load schemas")?;
            let icons = load_icon_mapping(&icons_path)
                .with_context(|| format!("Failed to read {}", icons_path.display()))?;
            let augmented = augment_all(&schemas, &root, &icons)?;
            write_icon_mapping(&output, &augmented)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            let with_icon = augmented.values().filter(|v| v.is_some()).count();
            info!("Wrote {} classes to {}", augmented.len(), output.display());
            println!(
                "✅ {} IFC classes ({} with an icon) written to {}",
                augmented.len(),
                with_icon,
                output.display()
            );
        }
        Commands::Export {
            icons,
            output,
            no_overwrite,
            no_invert,
        } => {
            let options = export_options(icons, output, no_overwrite, no_invert, &config);

            let report = save_ifc_icons(&options).context("Export failed")?;
            println!(
                "✅ {} IFC icons saved to {}",
                report.saved,
                report.output_dir.display()
            );
            if !report.unmatched.is_empty() {
                println!("⚠️  {} IFC classes without an icon", report.unmatched.len());
            }
            println!("   Manifest: {}", report.manifest.display());
        }
        Commands::List { icons, missing } => {
            let options = icons.into_options(&config);
            let matches = match_icons(&options)?;
            let mut unmatched = 0usize;
            for m in &matches {
                let codepoint = m.codepoint.as_deref().unwrap_or("-");
                match &m.icon {
                    Some(icon) if !missing => println!(
                        "{:<40} {:<6} {:<32} {}",
                        m.ifc_class, codepoint, icon.name, icon.category
                    ),
                    Some(_) => {}
                    None => {
                        unmatched += 1;
                        println!("{:<40} {:<6} -", m.ifc_class, codepoint);
                    }
                }
            }
            println!(
                "\n📊 {} IFC classes, {} matched, {} unmatched",
                matches.len(),
                matches.len() - unmatched,
                unmatched
            );
        }
        Commands::Fetch {
            full: _,
            base,
            url,
            output,
        } => {
            let (url, output) = fetch_target(base, url, output, &config);

            let fetcher = Fetcher::new(config.fetch.timeout())?;
            let count = fetcher
                .download_mapping(&url, &output)
                .with_context(|| format!("Failed to download {url}"))?;
            println!("💾 Saved {} icon assignments to {}", count, output.display());
        }
        Commands::Verify { output } => {
            let dir = output.unwrap_or_else(|| config.paths.output.clone());
            let report = manifest::verify(&dir)
                .with_context(|| format!("Failed to read manifest in {}", dir.display()))?;
            println!("📊 {} icons verified in {}", report.ok, dir.display());
            for class in &report.missing {
                println!("   - missing: {class}");
            }
            for class in &report.mismatched {
                println!("   - changed: {class}");
            }
            if !report.is_ok() {
                error!("Verification failed");
                drop(guard);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
