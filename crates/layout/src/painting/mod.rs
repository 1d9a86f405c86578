//! Stateless painters for the fixed regions of an invoice page.
//!
//! Each function returns draw commands for one region given where it goes;
//! deciding *when* a region is drawn is the engine's job.

pub mod chrome;
pub mod totals;

use crate::canvas::DrawCommand;
use crate::config::{LayoutConfig, PageGeometry};
use crate::fonts::{FontLibrary, FontRole};
use ledgerprint_types::Color;

pub const INK: Color = Color::rgb(0x22, 0x22, 0x22);
pub const MUTED: Color = Color::gray(110);
pub const RULE: Color = Color::gray(210);
pub const SHADE: Color = Color::gray(238);
pub const PANEL: Color = Color::gray(247);

/// Everything a painter needs to measure and position text.
#[derive(Debug, Clone, Copy)]
pub struct PaintContext<'a> {
    pub fonts: &'a FontLibrary,
    pub config: &'a LayoutConfig,
    pub geometry: PageGeometry,
}

impl<'a> PaintContext<'a> {
    pub fn new(fonts: &'a FontLibrary, config: &'a LayoutConfig) -> Self {
        Self {
            fonts,
            config,
            geometry: PageGeometry::from_config(config),
        }
    }

    pub fn right_aligned(
        &self,
        right: f32,
        baseline: f32,
        text: impl Into<String>,
        font: FontRole,
        size: f32,
        color: Color,
    ) -> DrawCommand {
        let text = text.into();
        let x = right - self.fonts.width_of(font, &text, size);
        DrawCommand::text(x, baseline, text, font, size, color)
    }

    pub fn centered(
        &self,
        center: f32,
        baseline: f32,
        text: impl Into<String>,
        font: FontRole,
        size: f32,
        color: Color,
    ) -> DrawCommand {
        let text = text.into();
        let x = center - self.fonts.width_of(font, &text, size) / 2.0;
        DrawCommand::text(x, baseline, text, font, size, color)
    }
}

/// Baseline for text of `font_size` vertically centred in a line box whose
/// top edge is `top`.
pub fn baseline(top: f32, line_height: f32, font_size: f32) -> f32 {
    top - (line_height - font_size) / 2.0 - font_size * 0.8
}
