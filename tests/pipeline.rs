//! End-to-end checks over the byte-level API: encoded image in, encoded
//! image (or palette) out.

use image::{Rgba, RgbaImage};
use pixel_palette_wasm::{
    ColorMapping, codec, extract_palette_bytes, formats, replace_colors_bytes,
};

fn sample_image() -> RgbaImage {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([200, 30, 30, 255]));
    img.put_pixel(1, 0, Rgba([30, 200, 30, 128]));
    img.put_pixel(0, 1, Rgba([200, 30, 30, 255]));
    img.put_pixel(1, 1, Rgba([9, 9, 9, 0]));
    img
}

#[test]
fn extract_from_png_bytes() {
    let png = codec::encode_png(&sample_image()).unwrap();
    let colors = extract_palette_bytes(&png).unwrap();
    // Green is brighter than red; the transparent pixel contributes nothing.
    assert_eq!(colors, vec!["#c81e1e", "#1ec81e"]);
}

#[test]
fn replace_colors_through_png_and_back() {
    let png = codec::encode_png(&sample_image()).unwrap();
    let targets = vec!["#ff0000".to_string(), "#00ff00".to_string()];

    let outcome = replace_colors_bytes(&png, &targets, None).unwrap();
    assert_eq!(outcome.source_palette, vec!["#c81e1e", "#1ec81e"]);
    assert_eq!(outcome.mapping.get("#c81e1e"), Some("#ff0000"));
    assert_eq!(outcome.mapping.get("#1ec81e"), Some("#00ff00"));

    let result = codec::decode_image(&outcome.png).unwrap();
    assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(result.get_pixel(1, 0).0, [0, 255, 0, 128]);
    assert_eq!(result.get_pixel(0, 1).0, [255, 0, 0, 255]);
    assert_eq!(result.get_pixel(1, 1).0, [0, 0, 0, 0]);
}

#[test]
fn edited_mapping_survives_a_second_pass() {
    let png = codec::encode_png(&sample_image()).unwrap();
    let targets = vec!["#ff0000".to_string(), "#00ff00".to_string()];

    let mut mapping = replace_colors_bytes(&png, &targets, None).unwrap().mapping;
    mapping.set("#c81e1e", "#00ff00");

    let outcome = replace_colors_bytes(&png, &targets, Some(mapping.clone())).unwrap();
    assert_eq!(outcome.mapping, mapping);
    let result = codec::decode_image(&outcome.png).unwrap();
    assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]);
}

#[test]
fn data_uri_boundary_round_trips() {
    let uri = codec::encode_png_data_uri(&sample_image()).unwrap();
    let bytes = codec::decode_data_uri(&uri).unwrap();
    let colors = extract_palette_bytes(&bytes).unwrap();
    assert_eq!(colors.len(), 2);
}

#[test]
fn extracted_palette_exports_and_parses_in_every_format() {
    let png = codec::encode_png(&sample_image()).unwrap();
    let colors = extract_palette_bytes(&png).unwrap();

    for format in [
        formats::PaletteFormat::Gpl,
        formats::PaletteFormat::Kpl,
        formats::PaletteFormat::Json,
    ] {
        let file = formats::write_palette(&colors, "Sample", format).unwrap();
        assert_eq!(formats::parse_palette(&file, format).unwrap(), colors);
    }
}

#[test]
fn remap_keeps_unmapped_colors_from_a_partial_mapping() {
    let png = codec::encode_png(&sample_image()).unwrap();
    let mut mapping = ColorMapping::new();
    mapping.set("#c81e1e", "#0000ff");

    let outcome =
        replace_colors_bytes(&png, &["#0000ff".to_string()], Some(mapping)).unwrap();
    let result = codec::decode_image(&outcome.png).unwrap();
    assert_eq!(result.get_pixel(0, 0).0, [0, 0, 255, 255]);
    // Green was absent from the mapping and passes through untouched.
    assert_eq!(result.get_pixel(1, 0).0, [30, 200, 30, 128]);
}
