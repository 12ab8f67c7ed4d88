//! JSON palette format: `{name, colors: [{name, hex, rgb: {r, g, b}}]}`.

use serde::Serialize;
use serde_json::Value;

use crate::color::hex_to_rgb;
use crate::error::{Error, Result};

#[derive(Debug, Serialize)]
struct PaletteFile<'a> {
    name: &'a str,
    description: &'a str,
    colors: Vec<PaletteEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct PaletteEntry<'a> {
    name: &'a str,
    hex: &'a str,
    rgb: RgbChannels,
}

#[derive(Debug, Serialize)]
struct RgbChannels {
    r: u8,
    g: u8,
    b: u8,
}

/// Parse a JSON palette.
///
/// Accepts the canonical `{name, colors: [{hex, ..}]}` shape as well as the
/// looser shapes seen in the wild: `{palette: [..]}`, `{colors: [..]}` of
/// bare hex strings, or a bare hex-string array. Entries that are neither
/// strings nor objects with a `hex` field are skipped.
pub fn parse(content: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| Error::PaletteFileFormat(format!("invalid JSON: {e}")))?;

    let list = if let Some(arr) = value.get("palette").and_then(Value::as_array) {
        arr
    } else if let Some(arr) = value.get("colors").and_then(Value::as_array) {
        arr
    } else if let Some(arr) = value.as_array() {
        arr
    } else {
        return Err(Error::PaletteFileFormat(
            "no color list in JSON palette".into(),
        ));
    };

    Ok(list.iter().filter_map(entry_hex).collect())
}

fn entry_hex(entry: &Value) -> Option<String> {
    match entry {
        Value::String(hex) => Some(hex.clone()),
        Value::Object(obj) => obj.get("hex").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Serialize hex colors as the canonical JSON palette shape.
pub fn write(colors: &[String], name: &str) -> Result<String> {
    let entries = colors
        .iter()
        .map(|hex| {
            let rgb = hex_to_rgb(hex)?;
            Ok(PaletteEntry {
                name: hex,
                hex,
                rgb: RgbChannels {
                    r: rgb.red,
                    g: rgb.green,
                    b: rgb.blue,
                },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let file = PaletteFile {
        name,
        description: "Pixel art palette export",
        colors: entries,
    };
    serde_json::to_string_pretty(&file).map_err(|e| Error::PaletteFileFormat(e.to_string()))
}
