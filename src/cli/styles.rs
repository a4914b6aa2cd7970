//! Styles command implementation.
//!
//! Lists the builtin palette styles, optionally with their colours.

use std::path::PathBuf;

use clap::Args;

use crate::error::{AvatarError, Result};
use crate::output::{plural, Printer};
use crate::registry::StyleRegistry;
use crate::types::Palette;

/// List the available palette styles
#[derive(Args, Debug, Default)]
pub struct StylesArgs {
    /// Only show this style
    pub style: Option<String>,

    /// Print each style's colours as hex on stdout
    #[arg(long, conflicts_with = "json")]
    pub colours: bool,

    /// Print the styles as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StylesArgs, printer: &Printer) -> Result<()> {
    let registry = StyleRegistry::builtin()?;
    let palettes: Vec<&Palette> = match &args.style {
        Some(style) => vec![registry.get(style)?],
        None => registry.iter().collect(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&palettes).map_err(|e| AvatarError::OutputWrite {
            path: PathBuf::from("<stdout>"),
            message: e.to_string(),
        })?;
        println!("{}", json);
        return Ok(());
    }

    if args.colours {
        for palette in &palettes {
            println!("{}", colour_line(palette));
        }
        return Ok(());
    }

    for palette in &palettes {
        printer.info(&palette.id, &describe(palette));
    }
    if args.style.is_none() {
        printer.status("Found", &plural(palettes.len(), "style", "styles"));
    }

    Ok(())
}

/// One-line summary of a style: name, label, size and modes.
pub fn describe(palette: &Palette) -> String {
    format!(
        "{} ({}): {}, {}, {}",
        palette.name,
        palette.label,
        plural(palette.len(), "colour", "colours"),
        palette.quantize,
        palette.upscale
    )
}

/// `<id>: #RRGGBB #RRGGBB ...`
fn colour_line(palette: &Palette) -> String {
    let hexes: Vec<String> = palette.colours().iter().map(|c| c.to_string()).collect();
    format!("{}: {}", palette.id, hexes.join(" "))
}
