//! RGB↔hex conversion, Euclidean distance and luminance ordering.

use palette::Srgb;

use crate::error::{Error, Result};

/// Working RGB triple. Alpha never participates in color identity.
pub type Rgb = Srgb<u8>;

/// Canonical lowercase `#rrggbb` form of a color.
///
/// Channels outside 0–255 are clamped, so this is total over any integer
/// input (palette files occasionally carry out-of-range values).
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    let clamp = |v: i32| v.clamp(0, 255) as u8;
    format!("#{:02x}{:02x}{:02x}", clamp(r), clamp(g), clamp(b))
}

/// Shorthand for [`rgb_to_hex`] over an already-valid triple.
pub fn hex_of(rgb: Rgb) -> String {
    rgb_to_hex(rgb.red.into(), rgb.green.into(), rgb.blue.into())
}

/// Parse a `#rrggbb` string (case-insensitive) into an RGB triple.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let err = || Error::InvalidColorFormat(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(err)?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
    Ok(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Euclidean distance in RGB space, in `[0, ~441.67]`.
///
/// Symmetric; zero only for identical colors.
pub fn distance(a: Rgb, b: Rgb) -> f32 {
    (distance_squared(a, b) as f32).sqrt()
}

fn distance_squared(a: Rgb, b: Rgb) -> i32 {
    let dr = i32::from(a.red) - i32::from(b.red);
    let dg = i32::from(a.green) - i32::from(b.green);
    let db = i32::from(a.blue) - i32::from(b.blue);
    dr * dr + dg * dg + db * db
}

/// Weighted luminance `0.299r + 0.587g + 0.114b`.
///
/// Used purely as a total order key for palette display, not as a perceptual
/// model.
pub fn luminance(c: Rgb) -> f32 {
    0.299 * f32::from(c.red) + 0.587 * f32::from(c.green) + 0.114 * f32::from(c.blue)
}

/// Index of the candidate nearest to `color`, or `None` for no candidates.
///
/// The running best starts at the first candidate and is only replaced on a
/// strictly smaller distance, so the first candidate to attain the minimum
/// wins ties. Squared integer distance keeps the same argmin and the same
/// ties as the sqrt form.
pub fn nearest(color: Rgb, candidates: &[Rgb]) -> Option<usize> {
    let mut best = 0usize;
    let mut best_dist = distance_squared(color, *candidates.first()?);
    for (idx, &cand) in candidates.iter().enumerate().skip(1) {
        let d = distance_squared(color, cand);
        if d < best_dist {
            best_dist = d;
            best = idx;
        }
    }
    Some(best)
}
