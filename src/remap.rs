//! Color remapping: nearest-neighbor palette mapping and pixel rewrite.

use std::collections::HashMap;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, hex_of, hex_to_rgb, nearest, rgb_to_hex};
use crate::error::{Error, Result};
use crate::extract::unique_colors;

/// Source→target color association, keyed by canonical hex strings.
///
/// Built once per source image via nearest-neighbor search (see
/// [`remap_image`]) and then edited one entry at a time with [`set`]; it is
/// never rebuilt while the same source image is being worked on.
/// Serializes as a flat `{"#rrggbb": "#rrggbb"}` JSON object.
///
/// [`set`]: ColorMapping::set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMapping {
    entries: HashMap<String, String>,
}

impl ColorMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target hex for a source color, if the mapping covers it.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    /// Retarget a single source color. Inserting over an existing key
    /// replaces that entry.
    pub fn set(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.entries.insert(source.into(), target.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Map every source color to its nearest target by Euclidean RGB
    /// distance. The first target to attain the minimum distance wins ties.
    pub fn from_nearest(source_palette: &[String], targets: &[Rgb]) -> Result<Self> {
        let mut mapping = Self::new();
        for source_hex in source_palette {
            let rgb = hex_to_rgb(source_hex)?;
            let Some(idx) = nearest(rgb, targets) else {
                return Err(Error::EmptyTargetPalette);
            };
            mapping.set(source_hex.clone(), hex_of(targets[idx]));
        }
        Ok(mapping)
    }
}

/// Result of a remap: the repainted buffer, the colors found in the source
/// (raster first-seen order, for building a UI list), and the mapping that
/// was actually applied — thread it back in to edit entries without
/// re-running nearest-neighbor search.
#[derive(Debug, Clone)]
pub struct RemapOutcome {
    pub image: RgbaImage,
    pub source_palette: Vec<String>,
    pub mapping: ColorMapping,
}

/// Repaint `img` through a source→target color mapping.
///
/// Steps:
/// 1. Collect the source palette (transparent-skip + dedup, raster order).
/// 2. Build a nearest-neighbor mapping onto `target_palette` unless the
///    caller supplied one. A supplied mapping is applied as-is — entries are
///    not checked against `target_palette` membership, so a stale target
///    passes through unchanged.
/// 3. Rewrite every pixel: fully transparent pixels are normalized to
///    `(0,0,0,0)`; mapped colors take the target RGB with the original
///    alpha; colors absent from the mapping keep their original bytes
///    (identity fallback, never an error).
pub fn remap_image(
    img: &RgbaImage,
    target_palette: &[String],
    mapping: Option<ColorMapping>,
) -> Result<RemapOutcome> {
    if target_palette.is_empty() {
        return Err(Error::EmptyTargetPalette);
    }
    let targets = target_palette
        .iter()
        .map(|hex| hex_to_rgb(hex))
        .collect::<Result<Vec<_>>>()?;

    let source_palette = unique_colors(img)?;

    let mapping = match mapping {
        Some(m) => m,
        None => ColorMapping::from_nearest(&source_palette, &targets)?,
    };

    // Resolve target hexes up front so the pixel loop never parses.
    let mut resolved: HashMap<String, [u8; 3]> = HashMap::with_capacity(mapping.len());
    for (source, target) in mapping.iter() {
        let t = hex_to_rgb(target)?;
        resolved.insert(source.to_string(), [t.red, t.green, t.blue]);
    }

    let mut out = RgbaImage::new(img.width(), img.height());
    for (src, dst) in img.pixels().zip(out.pixels_mut()) {
        let [r, g, b, a] = src.0;
        if a == 0 {
            // Normalized rather than passed through; downstream consumers
            // compare raw bytes.
            dst.0 = [0, 0, 0, 0];
            continue;
        }
        let hex = rgb_to_hex(r.into(), g.into(), b.into());
        dst.0 = match resolved.get(hex.as_str()) {
            Some(&[tr, tg, tb]) => [tr, tg, tb, a],
            None => [r, g, b, a],
        };
    }

    Ok(RemapOutcome {
        image: out,
        source_palette,
        mapping,
    })
}
