//! Palette extraction and color remapping for pixel art.
//!
//! The core is a pair of pure transforms over RGBA pixel buffers: extract a
//! deduplicated, luminance-ordered palette, or repaint an image through a
//! source→target color mapping built by nearest-neighbor search in RGB space.
//! Around that sit thin boundary layers: an image codec, GPL/KPL/JSON palette
//! file codecs, and `wasm-bindgen` exports that speak the browser's base64
//! data-URI dialect.

pub mod codec;
pub mod color;
pub mod error;
pub mod extract;
pub mod formats;
pub mod remap;

pub use error::{Error, Result};
pub use remap::{ColorMapping, RemapOutcome};

use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

// ------------------------------------------------------------
// Byte-level operations (native and wasm)
// ------------------------------------------------------------

/// Extract the palette of an encoded image: unique opaque colors, dark to
/// light.
pub fn extract_palette_bytes(input: &[u8]) -> Result<Vec<String>> {
    let img = codec::decode_image(input)?;
    extract::extract_palette(&img)
}

/// Outcome of [`replace_colors_bytes`]: the PNG-encoded result plus the data
/// a caller needs to drive incremental mapping edits.
#[derive(Debug, Clone)]
pub struct ReplaceOutcome {
    pub png: Vec<u8>,
    pub source_palette: Vec<String>,
    pub mapping: ColorMapping,
}

/// Remap an encoded image onto `target_palette` and PNG-encode the result.
///
/// Pass the returned mapping back in after editing entries to repaint
/// without re-running nearest-neighbor search.
pub fn replace_colors_bytes(
    input: &[u8],
    target_palette: &[String],
    mapping: Option<ColorMapping>,
) -> Result<ReplaceOutcome> {
    let img = codec::decode_image(input)?;
    let outcome = remap::remap_image(&img, target_palette, mapping)?;
    Ok(ReplaceOutcome {
        png: codec::encode_png(&outcome.image)?,
        source_palette: outcome.source_palette,
        mapping: outcome.mapping,
    })
}

// ------------------------------------------------------------
// Browser boundary (wasm-bindgen)
// ------------------------------------------------------------

/// Extract a palette from a base64 image payload (optionally prefixed with a
/// `data:image/<type>;base64,` marker). Returns hex strings dark to light.
#[wasm_bindgen]
pub fn extract_palette(image_data: String) -> Result<Array, JsValue> {
    let bytes = codec::decode_data_uri(&image_data).map_err(to_js)?;
    let colors = extract_palette_bytes(&bytes).map_err(to_js)?;
    Ok(hex_array(&colors))
}

/// Remap an image onto a target palette.
///
/// `color_mapping` is either `undefined`/`null` (a nearest-neighbor mapping
/// is built) or a `{sourceHex: targetHex}` object from a previous call,
/// applied as-is. Returns `{imageData, sourcePalette, colorMapping}` with the
/// result image as a `data:image/png;base64,` URI.
#[wasm_bindgen]
pub fn replace_colors(
    image_data: String,
    target_palette: Array,
    color_mapping: JsValue,
) -> Result<Object, JsValue> {
    let bytes = codec::decode_data_uri(&image_data).map_err(to_js)?;
    let targets = hex_vec(&target_palette)?;
    let mapping = mapping_from_js(&color_mapping)?;

    let img = codec::decode_image(&bytes).map_err(to_js)?;
    let outcome = remap::remap_image(&img, &targets, mapping).map_err(to_js)?;
    let data_uri = codec::encode_png_data_uri(&outcome.image).map_err(to_js)?;

    let result = Object::new();
    Reflect::set(
        &result,
        &JsValue::from_str("imageData"),
        &JsValue::from_str(&data_uri),
    )?;
    Reflect::set(
        &result,
        &JsValue::from_str("sourcePalette"),
        &hex_array(&outcome.source_palette),
    )?;
    Reflect::set(
        &result,
        &JsValue::from_str("colorMapping"),
        &mapping_to_js(&outcome.mapping)?.into(),
    )?;
    Ok(result)
}

/// Parse a GPL/KPL/JSON palette file into hex colors. `format` is a file
/// name or bare extension.
#[wasm_bindgen]
pub fn parse_palette(content: Vec<u8>, format: String) -> Result<Array, JsValue> {
    let format = palette_format(&format)?;
    let colors = formats::parse_palette(&content, format).map_err(to_js)?;
    Ok(hex_array(&colors))
}

/// Serialize hex colors as a GPL/KPL/JSON palette file.
#[wasm_bindgen]
pub fn export_palette(colors: Array, name: String, format: String) -> Result<Uint8Array, JsValue> {
    let format = palette_format(&format)?;
    let colors = hex_vec(&colors)?;
    let bytes = formats::write_palette(&colors, &name, format).map_err(to_js)?;
    Ok(Uint8Array::from(bytes.as_slice()))
}

// ------------------------------------------------------------
// JS conversion helpers
// ------------------------------------------------------------

fn to_js(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn palette_format(name: &str) -> Result<formats::PaletteFormat, JsValue> {
    formats::PaletteFormat::from_extension(name)
        .ok_or_else(|| JsValue::from_str(&format!("unsupported palette format: {name}")))
}

fn hex_array(colors: &[String]) -> Array {
    let arr = Array::new();
    for hex in colors {
        arr.push(&JsValue::from_str(hex));
    }
    arr
}

fn hex_vec(colors: &Array) -> Result<Vec<String>, JsValue> {
    colors
        .iter()
        .map(|v| {
            v.as_string()
                .ok_or_else(|| JsValue::from_str("palette entries must be strings"))
        })
        .collect()
}

fn mapping_from_js(value: &JsValue) -> Result<Option<ColorMapping>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let obj = value
        .dyn_ref::<Object>()
        .ok_or_else(|| JsValue::from_str("colorMapping must be an object"))?;
    let mut mapping = ColorMapping::new();
    for entry in Object::entries(obj).iter() {
        let pair = Array::from(&entry);
        let source = pair
            .get(0)
            .as_string()
            .ok_or_else(|| JsValue::from_str("colorMapping keys must be strings"))?;
        let target = pair
            .get(1)
            .as_string()
            .ok_or_else(|| JsValue::from_str("colorMapping values must be strings"))?;
        mapping.set(source, target);
    }
    Ok(Some(mapping))
}

fn mapping_to_js(mapping: &ColorMapping) -> Result<Object, JsValue> {
    let obj = Object::new();
    for (source, target) in mapping.iter() {
        Reflect::set(&obj, &JsValue::from_str(source), &JsValue::from_str(target))?;
    }
    Ok(obj)
}
