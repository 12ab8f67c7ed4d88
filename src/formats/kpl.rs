//! Krita palette (`.kpl`) format: a ZIP container holding an uncompressed
//! `mimetype` entry and a `colorset.xml` color list.

use std::io::{Cursor, Read, Write};

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::color::{hex_to_rgb, rgb_to_hex};
use crate::error::{Error, Result};

const MIMETYPE: &str = "application/x-krita-palette";
const COLUMNS: usize = 8;

fn file_err(e: impl std::fmt::Display) -> Error {
    Error::PaletteFileFormat(e.to_string())
}

/// Parse a KPL archive into hex colors.
///
/// Colors live in `colorset.xml` as `<sRGB r=".." g=".." b=".."/>` elements
/// whose channel fractions are in 0.0–1.0; fractions are rounded, not
/// truncated, into 0–255 channels.
pub fn parse(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(file_err)?;
    let mut xml = String::new();
    archive
        .by_name("colorset.xml")
        .map_err(|_| Error::PaletteFileFormat("no colorset.xml in KPL file".into()))?
        .read_to_string(&mut xml)
        .map_err(file_err)?;

    let mut reader = Reader::from_str(&xml);
    let mut colors = Vec::new();
    loop {
        match reader.read_event().map_err(file_err)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"sRGB" => {
                let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
                for attr in e.attributes() {
                    let attr = attr.map_err(file_err)?;
                    let value: f32 = attr
                        .unescape_value()
                        .map_err(file_err)?
                        .parse()
                        .map_err(file_err)?;
                    match attr.key.as_ref() {
                        b"r" => r = value,
                        b"g" => g = value,
                        b"b" => b = value,
                        _ => {}
                    }
                }
                colors.push(rgb_to_hex(channel(r), channel(g), channel(b)));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(colors)
}

/// Round a 0.0–1.0 channel fraction into 0–255.
fn channel(fraction: f32) -> i32 {
    (fraction.clamp(0.0, 1.0) * 255.0).round() as i32
}

/// Serialize hex colors as a KPL archive.
///
/// Krita sniffs the file by its first entry: `mimetype` must be written first
/// and stored uncompressed.
pub fn write(colors: &[String], name: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("mimetype", stored).map_err(file_err)?;
    zip.write_all(MIMETYPE.as_bytes()).map_err(file_err)?;

    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file("colorset.xml", deflated).map_err(file_err)?;
    zip.write_all(colorset_xml(colors, name)?.as_bytes())
        .map_err(file_err)?;

    Ok(zip.finish().map_err(file_err)?.into_inner())
}

fn colorset_xml(colors: &[String], name: &str) -> Result<String> {
    let rows = colors.len().div_ceil(COLUMNS);
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<Colorset version=\"2.0\" name=\"{}\" columns=\"{COLUMNS}\" rows=\"{rows}\">\n",
        escape(name)
    ));
    for (index, hex) in colors.iter().enumerate() {
        let rgb = hex_to_rgb(hex)?;
        xml.push_str(&format!(
            "  <ColorSetEntry name=\"{hex}\" id=\"color-{index}\" spot=\"false\" bitdepth=\"U8\">\n"
        ));
        xml.push_str(&format!(
            "    <sRGB r=\"{:.6}\" g=\"{:.6}\" b=\"{:.6}\"/>\n",
            f32::from(rgb.red) / 255.0,
            f32::from(rgb.green) / 255.0,
            f32::from(rgb.blue) / 255.0
        ));
        xml.push_str(&format!(
            "    <Position row=\"{}\" column=\"{}\"/>\n",
            index / COLUMNS,
            index % COLUMNS
        ));
        xml.push_str("  </ColorSetEntry>\n");
    }
    xml.push_str("</Colorset>\n");
    Ok(xml)
}
