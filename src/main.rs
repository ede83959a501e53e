use anyhow::Result;
use clap::Parser;
use icon_grid::{
    font::default_font_candidates,
    grid_gen::{self, ComposeOptions, ShadowStyle},
    icons::{default_icons, load_icon_set},
    layout::GridGeometry,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "icon-grid",
    about = "Compose eight pre-rendered icons into a labeled 4x2 grid sheet"
)]
struct Args {
    /// Directory holding the `icon_<name>_2048.png` source images.
    #[clap(value_name = "INPUT_DIR", default_value = "/home/ubuntu/Downloads")]
    input: PathBuf,

    /// Path of the PNG to write. Its parent directory must already exist.
    #[clap(
        value_name = "OUTPUT",
        default_value = "/home/ubuntu/Downloads/candy_icons_grid_8692x4636.png"
    )]
    output: PathBuf,

    /// Font to try before the system defaults. May be given more than once.
    #[clap(long, value_name = "PATH")]
    font: Vec<PathBuf>,

    /// JSON file with exactly 8 `{ "name", "label", "color" }` entries.
    #[clap(long, value_name = "FILE")]
    icons: Option<PathBuf>,

    /// Fade each shadow layer instead of drawing it in solid black.
    #[clap(long)]
    soft_shadow: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let icons = match &args.icons {
        Some(path) => load_icon_set(path)?,
        None => default_icons(),
    };

    let mut font_candidates = args.font.clone();
    font_candidates.extend(default_font_candidates());

    let options = ComposeOptions {
        geometry: GridGeometry::DEFAULT,
        icons,
        font_candidates,
        shadow: if args.soft_shadow {
            ShadowStyle::Soft
        } else {
            ShadowStyle::Solid
        },
    };

    println!("Icon directory: {}", args.input.display());
    println!("Output file: {}", args.output.display());
    println!(
        "Grid: {}x{}",
        options.geometry.columns, options.geometry.rows
    );
    println!();

    let report = grid_gen::compose(&args.input, &args.output, &options)?;

    for icon in &report.placed {
        println!("  ✓ Placed {} ({})", icon.name, icon.color);
    }
    println!("Labels drawn with {}", report.font);
    println!(
        "✓ Grid composition created: {} ({}x{}px)",
        args.output.display(),
        report.width,
        report.height
    );

    Ok(())
}
