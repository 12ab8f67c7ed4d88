//! Palette file codecs: GPL, KPL and JSON.

pub mod gpl;
pub mod json;
pub mod kpl;

use crate::error::{Error, Result};

/// Palette file formats understood by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFormat {
    Gpl,
    Kpl,
    Json,
}

impl PaletteFormat {
    /// Detect a format from a file name or a bare extension.
    pub fn from_extension(name: &str) -> Option<Self> {
        let ext = name.rsplit('.').next().unwrap_or(name);
        match ext.trim().to_ascii_lowercase().as_str() {
            "gpl" => Some(Self::Gpl),
            "kpl" => Some(Self::Kpl),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a palette file into hex colors. A file that yields no colors at all
/// is treated as unreadable.
pub fn parse_palette(bytes: &[u8], format: PaletteFormat) -> Result<Vec<String>> {
    let colors = match format {
        PaletteFormat::Gpl => gpl::parse(text(bytes)?),
        PaletteFormat::Json => json::parse(text(bytes)?)?,
        PaletteFormat::Kpl => kpl::parse(bytes)?,
    };
    if colors.is_empty() {
        return Err(Error::PaletteFileFormat(
            "no colors found in palette file".into(),
        ));
    }
    Ok(colors)
}

/// Serialize hex colors as a palette file in the given format.
pub fn write_palette(colors: &[String], name: &str, format: PaletteFormat) -> Result<Vec<u8>> {
    match format {
        PaletteFormat::Gpl => Ok(gpl::write(colors, name)?.into_bytes()),
        PaletteFormat::Json => Ok(json::write(colors, name)?.into_bytes()),
        PaletteFormat::Kpl => kpl::write(colors, name),
    }
}

fn text(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|_| Error::PaletteFileFormat("palette file is not valid UTF-8".into()))
}
