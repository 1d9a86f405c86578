//! Totals box and the PAID stamp.

use super::{INK, MUTED, PANEL, PaintContext, RULE};
use crate::canvas::{DrawCommand, meta};
use crate::fonts::FontRole;
use crate::text::format_money;
use ledgerprint_types::{InvoiceDocument, Rect, Totals};

const COMPACT_WIDTH: f32 = 200.0;
const BREAKDOWN_WIDTH: f32 = 250.0;
const BOX_PADDING: f32 = 10.0;
const ROW_HEIGHT: f32 = 16.0;
const TOTAL_ROW_HEIGHT: f32 = 18.0;
const RULE_GAP: f32 = 8.0;

const STAMP_TEXT: &str = "PAID";
const STAMP_SIZE: f32 = 34.0;
const STAMP_ROTATION: f32 = 18.0;
/// Vertical extent of the rotated stamp, used when reserving space.
const STAMP_EXTENT: f32 = 60.0;
const STAMP_GAP: f32 = 40.0;

fn breakdown_rows(totals: &Totals) -> usize {
    [totals.subtotal, totals.discount, totals.tax]
        .iter()
        .filter(|v| v.is_some())
        .count()
}

pub fn box_size(totals: &Totals) -> (f32, f32) {
    if totals.has_breakdown() {
        let height = 2.0 * BOX_PADDING
            + breakdown_rows(totals) as f32 * ROW_HEIGHT
            + RULE_GAP
            + TOTAL_ROW_HEIGHT;
        (BREAKDOWN_WIDTH, height)
    } else {
        (COMPACT_WIDTH, 2.0 * BOX_PADDING + TOTAL_ROW_HEIGHT)
    }
}

/// Height that must be free on a page before the totals are drawn. Covers
/// the stamp as well, so box and stamp always share a page.
pub fn reserved_height(doc: &InvoiceDocument) -> f32 {
    let (_, box_height) = box_size(&doc.totals);
    if doc.is_paid {
        box_height.max(STAMP_EXTENT)
    } else {
        box_height
    }
}

fn tax_label(rate: Option<f64>) -> String {
    match rate.filter(|r| r.is_finite()) {
        Some(rate) if rate.fract() == 0.0 => format!("Tax ({:.0}%)", rate),
        Some(rate) => format!("Tax ({}%)", rate),
        None => "Tax".to_string(),
    }
}

/// Totals box whose top edge is at `top`, right-aligned to the content area.
pub fn totals_commands(ctx: &PaintContext<'_>, doc: &InvoiceDocument, top: f32) -> Vec<DrawCommand> {
    let totals = &doc.totals;
    let currency = doc.currency_code.as_str();
    let (width, height) = box_size(totals);
    let rect = Rect::new(ctx.geometry.content_right - width, top - height, width, height);
    let label_x = rect.x + BOX_PADDING;
    let value_right = rect.right() - BOX_PADDING;
    let total_text = format_money(totals.total, currency);

    let mut commands = vec![
        DrawCommand::meta(meta::TOTALS, total_text.clone()),
        DrawCommand::Rect {
            rect,
            fill: Some(PANEL),
            stroke: Some(ctx.config.accent_color),
        },
    ];

    let mut row_top = top - BOX_PADDING;
    if totals.has_breakdown() {
        let rows = [
            totals.subtotal.map(|v| ("Subtotal".to_string(), v)),
            totals.discount.map(|v| ("Discount".to_string(), -v.abs())),
            totals.tax.map(|v| (tax_label(totals.tax_rate_percent), v)),
        ];
        for (label, value) in rows.into_iter().flatten() {
            let baseline = super::baseline(row_top, ROW_HEIGHT, 9.5);
            commands.push(DrawCommand::text(label_x, baseline, label, FontRole::Regular, 9.5, MUTED));
            commands.push(ctx.right_aligned(
                value_right,
                baseline,
                format_money(value, currency),
                FontRole::Regular,
                9.5,
                INK,
            ));
            row_top -= ROW_HEIGHT;
        }
        let rule_y = row_top - RULE_GAP / 2.0;
        commands.push(DrawCommand::hline(label_x, value_right, rule_y, 0.5, RULE));
        row_top -= RULE_GAP;
    }

    let baseline = super::baseline(row_top, TOTAL_ROW_HEIGHT, 11.0);
    commands.push(DrawCommand::text(label_x, baseline, "Total", FontRole::Bold, 11.0, INK));
    commands.push(ctx.right_aligned(value_right, baseline, total_text, FontRole::Bold, 11.0, INK));
    commands
}

/// Rotated `PAID` stamp to the left of the totals box whose top is `top`.
pub fn paid_stamp_commands(ctx: &PaintContext<'_>, doc: &InvoiceDocument, top: f32) -> Vec<DrawCommand> {
    let (width, _) = box_size(&doc.totals);
    let stamp_width = ctx.fonts.width_of(FontRole::Bold, STAMP_TEXT, STAMP_SIZE);
    let x = (ctx.geometry.content_right - width - STAMP_GAP - stamp_width).max(ctx.geometry.content_left);
    let y = top - reserved_height(doc) + 6.0;

    vec![
        DrawCommand::meta(meta::PAID_STAMP, STAMP_TEXT),
        DrawCommand::Text {
            x,
            y,
            text: STAMP_TEXT.to_string(),
            font: FontRole::Bold,
            size: STAMP_SIZE,
            color: ctx.config.paid_color,
            rotation: STAMP_ROTATION,
        },
    ]
}
