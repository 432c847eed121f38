#![deny(unsafe_code)]
//! CLI binary for the lowpoly triangle pattern generator.
//!
//! Subcommands:
//! - `render` generates a pattern and writes a PNG
//! - `mesh` generates a pattern and prints its triangles as JSON
//! - `list` prints the built-in palettes

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use log::{info, warn};
use lowpoly_core::pattern::grid_size;
use lowpoly_core::{generate, GenerationParameters, Palette, Srgb};
use lowpoly_render::snapshot::write_png;
use lowpoly_render::{RenderStyle, DEFAULT_BACKGROUND, DEFAULT_STROKE_OPACITY};
use std::path::{Path, PathBuf};
use std::process;

/// Largest accepted image side in pixels.
const MAX_IMAGE_SIDE: u32 = 16_384;

#[derive(Parser)]
#[command(name = "lowpoly", about = "Low-poly triangle pattern generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a pattern and write it as a PNG image.
    Render {
        #[command(flatten)]
        pattern: PatternArgs,

        /// Background color painted before the triangles.
        #[arg(long, default_value_t = DEFAULT_BACKGROUND)]
        background: Srgb,

        /// Opacity of the black triangle outline, 0 disables it.
        #[arg(long, default_value_t = DEFAULT_STROKE_OPACITY)]
        stroke_opacity: f64,

        /// Output file path.
        #[arg(short, long, default_value = "pattern.png")]
        output: PathBuf,
    },
    /// Generate a pattern and print its triangles as JSON.
    Mesh {
        #[command(flatten)]
        pattern: PatternArgs,
    },
    /// List built-in palettes.
    List,
}

/// Flags shared by every generating subcommand. Each one overrides the
/// matching field of `--recipe`, which in turn overrides the defaults.
#[derive(Args, Debug, Default)]
struct PatternArgs {
    /// JSON recipe file with any of width, height, triangle_count, palette,
    /// displacement and seed.
    #[arg(long)]
    recipe: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(short = 'W', long)]
    width: Option<f64>,

    /// Canvas height in pixels.
    #[arg(short = 'H', long)]
    height: Option<f64>,

    /// Advisory triangle target.
    #[arg(short, long)]
    count: Option<usize>,

    /// Built-in palette name (see `lowpoly list`).
    #[arg(short, long, conflicts_with = "colors")]
    palette: Option<String>,

    /// Comma-separated hex colors, e.g. "#001f3f,#0a9396,#94d2bd".
    #[arg(long)]
    colors: Option<String>,

    /// Interior point jitter as a fraction of the cell size.
    #[arg(short, long, allow_negative_numbers = true)]
    displacement: Option<f64>,

    /// Seed for reproducible output. Omit for a fresh pattern every run.
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,
}

impl PatternArgs {
    /// Resolves defaults, recipe, and flags into one parameter set.
    fn resolve(&self) -> Result<GenerationParameters, CliError> {
        let mut params = match &self.recipe {
            Some(path) => load_recipe(path)?,
            None => GenerationParameters::default(),
        };
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(count) = self.count {
            params.triangle_count = count;
        }
        if let Some(name) = &self.palette {
            params.palette = Palette::from_name(name)?;
        }
        if let Some(list) = &self.colors {
            params.palette = Palette::parse_list(list)?;
        }
        if let Some(displacement) = self.displacement {
            params.displacement = displacement;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        params.validate()?;
        Ok(params)
    }
}

fn load_recipe(path: &Path) -> Result<GenerationParameters, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("failed to read {}: {e}", path.display())))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid recipe {}: {e}", path.display())))?;
    info!("loaded recipe from {}", path.display());
    Ok(GenerationParameters::from_json(&value)?)
}

/// Rounds a validated canvas side up to whole pixels.
fn pixel_side(name: &str, side: f64) -> Result<u32, CliError> {
    let px = side.ceil();
    if px > f64::from(MAX_IMAGE_SIDE) {
        return Err(CliError::Input(format!(
            "{name} {side} exceeds the {MAX_IMAGE_SIDE} pixel image limit"
        )));
    }
    Ok(px as u32)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({ "palettes": palettes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                for name in palettes {
                    let palette = Palette::from_name(name)?;
                    let hexes: Vec<String> = palette.colors().iter().map(|c| c.to_hex()).collect();
                    println!("  {name:<12} {}", hexes.join(" "));
                }
            }
        }
        Command::Mesh { pattern } => {
            let params = pattern.resolve()?;
            if params.seed.is_none() {
                warn!("no seed given, mesh will not be reproducible");
            }
            let triangles = generate(&params)?;
            let mesh = serde_json::json!({
                "params": params,
                "grid_size": grid_size(params.triangle_count),
                "triangles": triangles,
            });
            // Mesh output is data; --json only switches between compact and
            // pretty printing.
            if cli.json {
                println!("{}", serde_json::to_string(&mesh)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&mesh)?);
            }
        }
        Command::Render {
            pattern,
            background,
            stroke_opacity,
            output,
        } => {
            if !(0.0..=1.0).contains(&stroke_opacity) {
                return Err(CliError::Input(format!(
                    "stroke opacity must be in [0, 1], got {stroke_opacity}"
                )));
            }
            let params = pattern.resolve()?;
            let width = pixel_side("width", params.width)?;
            let height = pixel_side("height", params.height)?;
            let triangles = generate(&params)?;
            let style = RenderStyle {
                background,
                stroke_opacity,
            };
            write_png(&triangles, width, height, &style, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "triangles": triangles.len(),
                    "seed": params.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let seed = params
                    .seed
                    .map_or_else(|| "unseeded".to_string(), |s| format!("seed {s}"));
                eprintln!(
                    "rendered {} triangles ({width}x{height}, {seed}) -> {}",
                    triangles.len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({
                "error": e.to_string(),
                "kind": e.kind(),
                "exit_code": e.exit_code(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
