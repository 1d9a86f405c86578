//! Translation of canvas pages and resources into lopdf objects.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use ledgerprint_layout::fonts::{EmbeddedFont, FontSource};
use ledgerprint_layout::text::to_win_ansi;
use ledgerprint_layout::{DrawCommand, FontFace, FontMetrics, FontRole, ImageResource, Page};
use ledgerprint_render_core::RenderError;
use ledgerprint_types::Color;
use log::warn;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::Write;

/// Resource name of the regular face.
pub const FONT_REGULAR: &str = "F1";
/// Resource name of the bold face.
pub const FONT_BOLD: &str = "F2";

const LAST_CHAR: i64 = 255;
const STROKE_WIDTH: f32 = 0.75;

pub(crate) fn font_resource_name(role: FontRole) -> &'static str {
    match role {
        FontRole::Regular => FONT_REGULAR,
        FontRole::Bold => FONT_BOLD,
    }
}

pub fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn rgb_operands(color: Color) -> Vec<Object> {
    color.to_unit_rgb().iter().map(|&c| Object::Real(c)).collect()
}

/// Builds the content stream operations for one page.
///
/// `image_names` maps canvas resource ids to XObject names. Image commands
/// with an unknown id are skipped; `Meta` commands never produce output.
pub fn page_content(page: &Page, image_names: &BTreeMap<String, String>) -> Content {
    let mut operations = Vec::new();
    for command in &page.commands {
        match command {
            DrawCommand::Text {
                x,
                y,
                text,
                font,
                size,
                color,
                rotation,
            } => {
                if text.is_empty() {
                    continue;
                }
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font_resource_name(*font).as_bytes().to_vec()), (*size).into()],
                ));
                operations.push(Operation::new("rg", rgb_operands(*color)));
                if *rotation == 0.0 {
                    operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                } else {
                    let (sin, cos) = rotation.to_radians().sin_cos();
                    operations.push(Operation::new(
                        "Tm",
                        vec![cos.into(), sin.into(), (-sin).into(), cos.into(), (*x).into(), (*y).into()],
                    ));
                }
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawCommand::Rect { rect, fill, stroke } => {
                let paint = match (fill, stroke) {
                    (Some(_), Some(_)) => "B",
                    (Some(_), None) => "f",
                    (None, Some(_)) => "S",
                    (None, None) => continue,
                };
                if let Some(fill) = fill {
                    operations.push(Operation::new("rg", rgb_operands(*fill)));
                }
                if let Some(stroke) = stroke {
                    operations.push(Operation::new("w", vec![STROKE_WIDTH.into()]));
                    operations.push(Operation::new("RG", rgb_operands(*stroke)));
                }
                operations.push(Operation::new(
                    "re",
                    vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
                ));
                operations.push(Operation::new(paint, vec![]));
            }
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                operations.push(Operation::new("w", vec![(*width).into()]));
                operations.push(Operation::new("RG", rgb_operands(*color)));
                operations.push(Operation::new("m", vec![(*x1).into(), (*y1).into()]));
                operations.push(Operation::new("l", vec![(*x2).into(), (*y2).into()]));
                operations.push(Operation::new("S", vec![]));
            }
            DrawCommand::Image { rect, resource_id } => {
                let Some(name) = image_names.get(resource_id) else {
                    warn!("Skipping image '{}': not registered on the canvas", resource_id);
                    continue;
                };
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        rect.width.into(),
                        0.into(),
                        0.into(),
                        rect.height.into(),
                        rect.x.into(),
                        rect.y.into(),
                    ],
                ));
                operations.push(Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawCommand::Meta { .. } => {}
        }
    }
    Content { operations }
}

/// Compressed RGB image XObject.
pub(crate) fn image_xobject(id: &str, image: &ImageResource) -> Result<Stream, RenderError> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.is_empty() || image.rgb.len() != expected {
        return Err(RenderError::InvalidImage {
            id: id.to_string(),
            actual: image.rgb.len(),
            expected,
        });
    }
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, deflate(&image.rgb)?))
}

/// Font dictionary for a face referenced by name.
pub(crate) fn standard_font_dict(face: &FontFace) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.postscript_name(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// The pieces of an embedded TrueType face: font program stream, descriptor
/// (without its `FontFile2` reference) and the font dictionary (without its
/// `FontDescriptor` reference). The caller links them once ids are known.
pub(crate) struct EmbeddedFontObjects {
    pub font_file: Stream,
    pub descriptor: Dictionary,
    pub font: Dictionary,
}

pub(crate) fn embedded_font_objects(
    face: &FontFace,
    embedded: &EmbeddedFont,
) -> Result<EmbeddedFontObjects, RenderError> {
    let name = face.postscript_name();
    let font_file = Stream::new(
        dictionary! {
            "Length1" => embedded.data.len() as i64,
            "Filter" => "FlateDecode",
        },
        deflate(&embedded.data)?,
    );
    let descriptor = dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => name,
        "Flags" => embedded.flags as i64,
        "FontBBox" => embedded.bbox.iter().map(|&v| Object::Integer(v as i64)).collect::<Vec<_>>(),
        "ItalicAngle" => embedded.italic_angle,
        "Ascent" => embedded.ascent as i64,
        "Descent" => embedded.descent as i64,
        "CapHeight" => embedded.cap_height as i64,
        "StemV" => 80,
    };
    let font = dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => name,
        "FirstChar" => face.first_char() as i64,
        "LastChar" => LAST_CHAR,
        "Widths" => face.widths().iter().map(|&w| Object::Integer(w as i64)).collect::<Vec<_>>(),
        "Encoding" => "WinAnsiEncoding",
    };
    Ok(EmbeddedFontObjects {
        font_file,
        descriptor,
        font,
    })
}

pub(crate) fn embedded_source(face: &FontFace) -> Option<&EmbeddedFont> {
    match face.source() {
        FontSource::Embedded(embedded) => Some(embedded),
        FontSource::Standard => None,
    }
}
