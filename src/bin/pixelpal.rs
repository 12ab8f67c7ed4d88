use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pixel_palette_wasm::formats::{self, PaletteFormat};
use pixel_palette_wasm::{extract_palette_bytes, replace_colors_bytes};

/// Extract, convert and remap pixel-art palettes (native wrapper).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the palette of an image, dark to light
    Extract {
        /// Input image path
        input: PathBuf,

        /// Output palette format (gpl, kpl, json); prints hex lines if omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Palette name embedded in the exported file
        #[arg(short, long, default_value = "Palette")]
        name: String,

        /// Output file; defaults to the input name with the format extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Repaint an image onto a target palette
    Remap {
        /// Input image path
        input: PathBuf,

        /// Comma-separated list of hex colors to use as the target palette
        #[arg(short = 'c', long)]
        palette: Option<String>,

        /// Palette file (gpl, kpl or json) to use as the target palette
        #[arg(short = 'f', long)]
        palette_file: Option<PathBuf>,

        /// Output path for the remapped PNG
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a palette file between formats
    Convert {
        /// Input palette file (gpl, kpl or json)
        input: PathBuf,

        /// Target format (gpl, kpl, json)
        #[arg(long)]
        to: String,

        /// Palette name embedded in the exported file
        #[arg(short, long, default_value = "Palette")]
        name: String,

        /// Output file; defaults to the input name with the new extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Extract {
            input,
            format,
            name,
            output,
        } => {
            let bytes = fs::read(&input)?;
            let colors = extract_palette_bytes(&bytes).context("palette extraction failed")?;

            let Some(format) = format else {
                for hex in &colors {
                    println!("{hex}");
                }
                return Ok(());
            };
            let format = format_named(&format)?;
            let out_path =
                output.unwrap_or_else(|| input.with_extension(extension_of(format)));
            let data = formats::write_palette(&colors, &name, format)
                .context("palette export failed")?;
            fs::write(&out_path, data)?;
            println!("Saved → {}", out_path.display());
        }
        Command::Remap {
            input,
            palette,
            palette_file,
            output,
        } => {
            let targets = target_palette(palette.as_deref(), palette_file.as_deref())?;
            let bytes = fs::read(&input)?;
            let outcome = replace_colors_bytes(&bytes, &targets, None)
                .context("color replacement failed")?;

            let out_path = output.unwrap_or_else(|| {
                let stem = input.file_stem().unwrap_or_default().to_string_lossy();
                PathBuf::from(format!("remapped_{stem}.png"))
            });
            fs::write(&out_path, outcome.png)?;
            println!(
                "Saved → {} ({} source colors)",
                out_path.display(),
                outcome.source_palette.len()
            );
        }
        Command::Convert {
            input,
            to,
            name,
            output,
        } => {
            let from = format_of(&input)?;
            let to = format_named(&to)?;
            let colors = formats::parse_palette(&fs::read(&input)?, from)
                .context("palette parse failed")?;
            let out_path = output.unwrap_or_else(|| input.with_extension(extension_of(to)));
            let data =
                formats::write_palette(&colors, &name, to).context("palette export failed")?;
            fs::write(&out_path, data)?;
            println!("Saved → {}", out_path.display());
        }
    }

    Ok(())
}

fn target_palette(palette: Option<&str>, palette_file: Option<&Path>) -> Result<Vec<String>> {
    match (palette, palette_file) {
        (Some(list), None) => Ok(list
            .split(',')
            .map(|s| {
                let s = s.trim().trim_start_matches('#').to_lowercase();
                format!("#{s}")
            })
            .collect()),
        (None, Some(path)) => {
            let format = format_of(path)?;
            formats::parse_palette(&fs::read(path)?, format).context("palette parse failed")
        }
        _ => bail!("provide exactly one of --palette or --palette-file"),
    }
}

fn format_of(path: &Path) -> Result<PaletteFormat> {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    format_named(&name)
}

fn format_named(name: &str) -> Result<PaletteFormat> {
    PaletteFormat::from_extension(name)
        .with_context(|| format!("unsupported palette format: {name}"))
}

fn extension_of(format: PaletteFormat) -> &'static str {
    match format {
        PaletteFormat::Gpl => "gpl",
        PaletteFormat::Kpl => "kpl",
        PaletteFormat::Json => "json",
    }
}
