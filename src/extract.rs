//! Palette extraction: dedup the colors of a pixel buffer and order them.

use std::collections::HashSet;

use image::RgbaImage;

use crate::color::{hex_to_rgb, luminance, rgb_to_hex};
use crate::error::{Error, Result};

/// Unique colors of `img` in raster first-seen order.
///
/// Fully transparent pixels contribute nothing. Pixels that differ only in a
/// non-zero alpha collapse to one entry, since the dedup set is keyed by the
/// `#rrggbb` string alone.
pub fn unique_colors(img: &RgbaImage) -> Result<Vec<String>> {
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::InvalidImageDimensions);
    }

    let mut seen = HashSet::new();
    let mut colors = Vec::new();
    for px in img.pixels() {
        let [r, g, b, a] = px.0;
        if a == 0 {
            continue;
        }
        let hex = rgb_to_hex(r.into(), g.into(), b.into());
        if seen.insert(hex.clone()) {
            colors.push(hex);
        }
    }
    Ok(colors)
}

/// Extract the palette of `img`: unique colors sorted dark to light.
///
/// The sort is stable, so equal-luminance colors keep the order in which the
/// raster scan first met them. Empty output only for an empty or fully
/// transparent image.
pub fn extract_palette(img: &RgbaImage) -> Result<Vec<String>> {
    let mut colors = unique_colors(img)?;
    colors.sort_by(|a, b| hex_luminance(a).total_cmp(&hex_luminance(b)));
    Ok(colors)
}

fn hex_luminance(hex: &str) -> f32 {
    // Every entry here is canonical output of rgb_to_hex.
    hex_to_rgb(hex).map(luminance).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn image_of(width: u32, height: u32, pixels: &[[u8; 4]]) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for (px, raw) in img.pixels_mut().zip(pixels) {
            *px = Rgba(*raw);
        }
        img
    }

    #[test]
    fn single_opaque_color_next_to_transparency() {
        let img = image_of(2, 1, &[[255, 0, 0, 255], [0, 0, 0, 0]]);
        assert_eq!(extract_palette(&img).unwrap(), vec!["#ff0000"]);
    }

    #[test]
    fn equal_rgb_with_different_alpha_collapses() {
        let img = image_of(2, 1, &[[10, 20, 30, 255], [10, 20, 30, 128]]);
        assert_eq!(extract_palette(&img).unwrap(), vec!["#0a141e"]);
    }

    #[test]
    fn palette_is_sorted_dark_to_light() {
        let img = image_of(3, 1, &[
            [255, 255, 255, 255],
            [0, 0, 0, 255],
            [128, 128, 128, 255],
        ]);
        assert_eq!(
            extract_palette(&img).unwrap(),
            vec!["#000000", "#808080", "#ffffff"]
        );
    }

    #[test]
    fn unique_colors_keeps_first_seen_order() {
        let img = image_of(3, 1, &[
            [255, 255, 255, 255],
            [0, 0, 0, 255],
            [255, 255, 255, 255],
        ]);
        assert_eq!(unique_colors(&img).unwrap(), vec!["#ffffff", "#000000"]);
    }

    #[test]
    fn fully_transparent_image_yields_empty_palette() {
        let img = image_of(2, 2, &[[1, 2, 3, 0]; 4]);
        assert_eq!(extract_palette(&img).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn zero_dimension_buffer_is_rejected() {
        let img = RgbaImage::new(0, 5);
        assert!(matches!(
            extract_palette(&img),
            Err(Error::InvalidImageDimensions)
        ));
    }
}
