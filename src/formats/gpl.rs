//! GIMP palette (`.gpl`) text format.

use crate::color::{hex_to_rgb, rgb_to_hex};
use crate::error::Result;

/// Parse GPL text into hex colors.
///
/// Header lines (`GIMP Palette`, `Name:`, `Columns:`), `#` comments and blank
/// lines are skipped. Data rows are `R G B` with an optional trailing name;
/// channel values are clamped to 0–255. Rows that do not parse are skipped
/// rather than failing the whole file.
pub fn parse(content: &str) -> Vec<String> {
    let mut colors = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("GIMP")
            || trimmed.starts_with("Name:")
            || trimmed.starts_with("Columns:")
        {
            continue;
        }
        let channels: Vec<i32> = trimmed
            .split_whitespace()
            .take(3)
            .filter_map(|p| p.parse().ok())
            .collect();
        if let [r, g, b] = channels[..] {
            colors.push(rgb_to_hex(r, g, b));
        }
    }
    colors
}

/// Serialize hex colors as a GPL file, one right-aligned `R G B` row per
/// color with the hex string as its name.
pub fn write(colors: &[String], name: &str) -> Result<String> {
    let mut out = String::from("GIMP Palette\n");
    out.push_str(&format!("Name: {name}\n"));
    out.push_str("Columns: 8\n#\n");
    for hex in colors {
        let rgb = hex_to_rgb(hex)?;
        out.push_str(&format!(
            "{:>3} {:>3} {:>3}\t{hex}\n",
            rgb.red, rgb.green, rgb.blue
        ));
    }
    Ok(out)
}
