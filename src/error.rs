use thiserror::Error;

/// Errors produced by the palette engine and its boundary layers.
///
/// Structural problems (bad dimensions, empty palette, malformed hex) fail
/// fast; per-pixel data quality never errors — unmapped colors fall back to
/// the original pixel during a remap.
#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes could not be decoded into a raster image.
    #[error("unable to decode image: {0}")]
    ImageDecode(String),

    /// The decoded image has a zero width or height.
    #[error("invalid image dimensions")]
    InvalidImageDimensions,

    /// A color string is not `#` followed by six hex digits.
    #[error("invalid hex color: {0:?}")]
    InvalidColorFormat(String),

    /// A remap was requested with no target colors.
    #[error("target palette is empty")]
    EmptyTargetPalette,

    /// A GPL/KPL/JSON palette file could not be parsed or written.
    #[error("unreadable palette file: {0}")]
    PaletteFileFormat(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::ImageDecode(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
