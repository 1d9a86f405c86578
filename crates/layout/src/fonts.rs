//! Font metrics for layout and the data the serializer needs to reference
//! or embed each face.
//!
//! Every face is measured through its WinAnsi width table (codes 32..=255,
//! 1/1000 em units). The built-in faces carry the Helvetica AFM widths and
//! are referenced by name; TrueType faces get their table computed from
//! `hmtx` advances and are embedded whole.

use crate::text::encoding::{decode_win_ansi, encode_char};
use log::debug;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

const FIRST_CODE: u8 = 32;
const TABLE_LEN: usize = 224;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Invalid font data: {0}")]
    InvalidData(String),
}

/// Measures rendered text.
pub trait FontMetrics {
    /// Width in points of `text` set at `font_size`.
    fn width_of(&self, text: &str, font_size: f32) -> f32;

    fn postscript_name(&self) -> &str;
}

/// Selects which face of the library a run of text uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontRole {
    Regular,
    Bold,
}

/// Descriptor values for an embedded face, in 1/1000 em units.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedFont {
    pub data: Arc<Vec<u8>>,
    pub ascent: i32,
    pub descent: i32,
    pub cap_height: i32,
    pub italic_angle: f32,
    pub bbox: [i32; 4],
    pub flags: u32,
}

#[derive(Clone, PartialEq)]
pub enum FontSource {
    /// One of the PDF base-14 fonts; never embedded.
    Standard,
    Embedded(EmbeddedFont),
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Standard => f.write_str("Standard"),
            FontSource::Embedded(font) => f
                .debug_struct("Embedded")
                .field("data_len", &font.data.len())
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    postscript_name: String,
    widths: [u16; TABLE_LEN],
    source: FontSource,
}

impl FontFace {
    pub fn helvetica() -> Self {
        Self {
            postscript_name: "Helvetica".to_string(),
            widths: HELVETICA_WIDTHS,
            source: FontSource::Standard,
        }
    }

    pub fn helvetica_bold() -> Self {
        Self {
            postscript_name: "Helvetica-Bold".to_string(),
            widths: HELVETICA_BOLD_WIDTHS,
            source: FontSource::Standard,
        }
    }

    /// Parses a TrueType face and derives its WinAnsi width table.
    ///
    /// # Errors
    ///
    /// Returns `FontError::InvalidData` if `ttf-parser` rejects the bytes.
    pub fn from_truetype(data: Arc<Vec<u8>>) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| FontError::InvalidData(e.to_string()))?;

        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return Err(FontError::InvalidData("units_per_em is zero".to_string()));
        }
        let scale = |value: f32| (value * 1000.0 / units_per_em).round() as i32;

        let notdef_advance = face
            .glyph_hor_advance(ttf_parser::GlyphId(0))
            .unwrap_or(0);
        let mut widths = [0u16; TABLE_LEN];
        for (slot, code) in widths.iter_mut().zip(FIRST_CODE..=u8::MAX) {
            let advance = decode_win_ansi(code)
                .and_then(|ch| face.glyph_index(ch))
                .and_then(|gid| face.glyph_hor_advance(gid))
                .unwrap_or(notdef_advance);
            *slot = scale(advance as f32).clamp(0, u16::MAX as i32) as u16;
        }

        let postscript_name = face
            .names()
            .into_iter()
            .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|name| name.to_string())
            .map(|name| name.chars().filter(|c| c.is_ascii_graphic()).collect::<String>())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "EmbeddedFont".to_string());

        let bbox = face.global_bounding_box();
        // Nonsymbolic, plus ForceBold for heavy faces.
        let mut flags = 1 << 5;
        if face.is_bold() {
            flags |= 1 << 18;
        }
        let embedded = EmbeddedFont {
            ascent: scale(face.ascender() as f32),
            descent: scale(face.descender() as f32),
            cap_height: scale(face.capital_height().unwrap_or(face.ascender()) as f32),
            italic_angle: face.italic_angle(),
            bbox: [
                scale(bbox.x_min as f32),
                scale(bbox.y_min as f32),
                scale(bbox.x_max as f32),
                scale(bbox.y_max as f32),
            ],
            flags,
            data: data.clone(),
        };

        debug!(
            "Parsed TrueType face '{}' ({} bytes, {} units/em)",
            postscript_name,
            data.len(),
            units_per_em
        );

        Ok(Self {
            postscript_name,
            widths,
            source: FontSource::Embedded(embedded),
        })
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.source, FontSource::Embedded(_))
    }

    /// The full WinAnsi table, first entry for code 32.
    pub fn widths(&self) -> &[u16; TABLE_LEN] {
        &self.widths
    }

    pub fn first_char(&self) -> u8 {
        FIRST_CODE
    }

    /// Advance of one WinAnsi code in 1/1000 em units.
    pub fn code_width(&self, code: u8) -> u16 {
        if code < FIRST_CODE {
            return self.widths[0];
        }
        self.widths[(code - FIRST_CODE) as usize]
    }
}

impl FontMetrics for FontFace {
    fn width_of(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| self.code_width(encode_char(ch)) as u32)
            .sum();
        units as f32 * font_size / 1000.0
    }

    fn postscript_name(&self) -> &str {
        &self.postscript_name
    }
}

/// The two faces an invoice is set in.
#[derive(Debug, Clone, PartialEq)]
pub struct FontLibrary {
    regular: Arc<FontFace>,
    bold: Arc<FontFace>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl FontLibrary {
    pub fn new(regular: FontFace, bold: FontFace) -> Self {
        Self {
            regular: Arc::new(regular),
            bold: Arc::new(bold),
        }
    }

    /// Helvetica and Helvetica-Bold, measured from their AFM widths.
    pub fn standard() -> Self {
        Self::new(FontFace::helvetica(), FontFace::helvetica_bold())
    }

    pub fn from_truetype(regular: Arc<Vec<u8>>, bold: Arc<Vec<u8>>) -> Result<Self, FontError> {
        Ok(Self::new(
            FontFace::from_truetype(regular)?,
            FontFace::from_truetype(bold)?,
        ))
    }

    pub fn face(&self, role: FontRole) -> &FontFace {
        match role {
            FontRole::Regular => &self.regular,
            FontRole::Bold => &self.bold,
        }
    }

    pub fn regular(&self) -> &FontFace {
        &self.regular
    }

    pub fn bold(&self) -> &FontFace {
        &self.bold
    }

    pub fn width_of(&self, role: FontRole, text: &str, font_size: f32) -> f32 {
        self.face(role).width_of(text, font_size)
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; TABLE_LEN] = [
    // 0x20
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 350,
    // 0x80
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; TABLE_LEN] = [
    // 0x20
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 350,
    // 0x80
    556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_digit_widths() {
        let face = FontFace::helvetica();
        // Every digit is 556 units wide.
        assert!((face.width_of("0123456789", 10.0) - 55.6).abs() < 0.001);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let fonts = FontLibrary::standard();
        let text = "Consulting services";
        assert!(
            fonts.width_of(FontRole::Bold, text, 11.0)
                > fonts.width_of(FontRole::Regular, text, 11.0)
        );
    }

    #[test]
    fn test_currency_glyph_widths() {
        let face = FontFace::helvetica();
        assert_eq!(face.code_width(0xA3), 556); // £
        assert_eq!(face.code_width(0x80), 556); // €
        assert!((face.width_of("£", 1000.0) - 556.0).abs() < 0.001);
        assert!((face.width_of("€", 1000.0) - 556.0).abs() < 0.001);
    }

    #[test]
    fn test_unmapped_characters_measure_as_question_mark() {
        let face = FontFace::helvetica();
        assert_eq!(face.width_of("✓", 10.0), face.width_of("?", 10.0));
    }

    #[test]
    fn test_width_scales_linearly_with_size() {
        let face = FontFace::helvetica_bold();
        let small = face.width_of("INVOICE", 10.0);
        let large = face.width_of("INVOICE", 20.0);
        assert!((large - small * 2.0).abs() < 0.001);
    }

    #[test]
    fn test_standard_faces_are_not_embedded() {
        let fonts = FontLibrary::standard();
        assert!(!fonts.regular().is_embedded());
        assert_eq!(fonts.regular().postscript_name(), "Helvetica");
        assert_eq!(fonts.face(FontRole::Bold).postscript_name(), "Helvetica-Bold");
    }

    #[test]
    fn test_garbage_truetype_is_rejected() {
        let result = FontFace::from_truetype(Arc::new(b"definitely not a font".to_vec()));
        assert!(matches!(result, Err(FontError::InvalidData(_))));
    }
}
