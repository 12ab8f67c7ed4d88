//! Image decode/encode and the base64 data-URI request boundary.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Decode arbitrary encoded image bytes (PNG, JPEG, ...) into an RGBA buffer.
///
/// The result always carries an alpha channel; formats without one get opaque
/// alpha synthesized by the conversion.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(Error::InvalidImageDimensions);
    }
    Ok(rgba)
}

/// PNG-encode an RGBA buffer.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buf);
        img.write_to(&mut cursor, ImageFormat::Png)?;
    }
    Ok(buf)
}

/// Decode a base64 payload, stripping an optional `data:image/<type>;base64,`
/// prefix first.
pub fn decode_data_uri(data: &str) -> Result<Vec<u8>> {
    let payload = match data.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, b64)| b64)
            .ok_or_else(|| Error::ImageDecode("missing base64 marker in data URI".into()))?,
        None => data,
    };
    BASE64
        .decode(payload.trim())
        .map_err(|e| Error::ImageDecode(format!("invalid base64 payload: {e}")))
}

/// PNG-encode `img` and wrap it as a `data:image/png;base64,` URI.
pub fn encode_png_data_uri(img: &RgbaImage) -> Result<String> {
    Ok(format!(
        "data:image/png;base64,{}",
        BASE64.encode(encode_png(img)?)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_round_trip_preserves_pixels() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let png = encode_png(&img).unwrap();
        let back = decode_image(&png).unwrap();
        assert_eq!(back.as_raw(), img.as_raw());
    }

    #[test]
    fn garbage_bytes_fail_decode() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(Error::ImageDecode(_))
        ));
    }

    #[test]
    fn data_uri_prefix_is_stripped() {
        let decoded = decode_data_uri("data:image/png;base64,AAAA").unwrap();
        assert_eq!(decoded, vec![0, 0, 0]);
    }

    #[test]
    fn bare_base64_is_accepted() {
        assert_eq!(decode_data_uri("AAAA").unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn invalid_base64_fails() {
        assert!(matches!(
            decode_data_uri("data:image/png;base64,@@@@"),
            Err(Error::ImageDecode(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png,plainpayload"),
            Err(Error::ImageDecode(_))
        ));
    }

    #[test]
    fn data_uri_round_trip() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([1, 2, 3, 255]));
        let uri = encode_png_data_uri(&img).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        let back = decode_image(&decode_data_uri(&uri).unwrap()).unwrap();
        assert_eq!(back.as_raw(), img.as_raw());
    }
}
