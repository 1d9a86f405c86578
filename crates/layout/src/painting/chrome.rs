//! Header, column header and footer.

use super::{INK, MUTED, PaintContext, RULE, SHADE};
use crate::canvas::{DrawCommand, ImageResource, meta};
use crate::fonts::FontRole;
use ledgerprint_types::{Color, InvoiceDocument, Rect, Size};

/// Canvas id under which the logo raster is registered.
pub const LOGO_RESOURCE_ID: &str = "logo";

const LOGO_MAX_WIDTH: f32 = 160.0;
const LOGO_VERTICAL_INSET: f32 = 12.0;
const BLOCK_GAP_BELOW_BAND: f32 = 22.0;
const META_ROW_HEIGHT: f32 = 13.0;
const META_COLUMN_WIDTH: f32 = 180.0;

/// First-page header: accent band with logo or company name, the invoice
/// identity on the right, then bill-to, from and metadata columns.
///
/// `logo` must already be registered on the canvas under
/// [`LOGO_RESOURCE_ID`]; `None` draws the text fallback.
pub fn header_commands(
    ctx: &PaintContext<'_>,
    doc: &InvoiceDocument,
    logo: Option<&ImageResource>,
) -> Vec<DrawCommand> {
    let config = ctx.config;
    let geometry = &ctx.geometry;
    let top = geometry.page_height;
    let band_height = config.header_band_height;
    let band_bottom = top - band_height;

    let mut commands = vec![
        DrawCommand::meta(meta::HEADER, doc.invoice_number.clone()),
        DrawCommand::Rect {
            rect: Rect::new(0.0, band_bottom, geometry.page_width, band_height),
            fill: Some(config.accent_color),
            stroke: None,
        },
    ];

    match logo {
        Some(image) => {
            let bounds = Size::new(
                LOGO_MAX_WIDTH,
                (band_height - 2.0 * LOGO_VERTICAL_INSET).max(0.0),
            );
            let fitted = image.size().fit_within(bounds);
            let rect = Rect::new(
                geometry.content_left,
                band_bottom + (band_height - fitted.height) / 2.0,
                fitted.width,
                fitted.height,
            );
            commands.push(DrawCommand::Image {
                rect,
                resource_id: LOGO_RESOURCE_ID.to_string(),
            });
            commands.push(DrawCommand::meta(meta::LOGO, LOGO_RESOURCE_ID));
        }
        None => {
            let size = 16.0;
            commands.push(DrawCommand::text(
                geometry.content_left,
                band_bottom + band_height / 2.0 - size * 0.35,
                config.company_name.clone(),
                FontRole::Bold,
                size,
                Color::WHITE,
            ));
        }
    }

    let right = geometry.content_right;
    commands.push(ctx.right_aligned(right, top - 32.0, "INVOICE", FontRole::Bold, 22.0, Color::WHITE));
    commands.push(ctx.right_aligned(
        right,
        top - 46.0,
        format!("No. {}", doc.invoice_number),
        FontRole::Regular,
        9.0,
        Color::WHITE,
    ));
    commands.push(ctx.right_aligned(
        right,
        top - 58.0,
        doc.issue_date.clone(),
        FontRole::Regular,
        9.0,
        Color::WHITE,
    ));

    let block_top = band_bottom - BLOCK_GAP_BELOW_BAND;
    commands.extend(party_block(
        geometry.content_left,
        block_top,
        "BILL TO",
        &doc.client,
        &doc.counterparty_address_lines,
        config.max_address_lines,
    ));
    if !config.company_address.is_empty() {
        commands.extend(party_block(
            geometry.content_left + geometry.content_width() * 0.34,
            block_top,
            "FROM",
            &config.company_name,
            &config.company_address,
            config.max_address_lines,
        ));
    }
    commands.extend(metadata_column(ctx, doc, block_top));
    commands
}

fn party_block(
    x: f32,
    top: f32,
    label: &str,
    name: &str,
    address: &[String],
    max_lines: usize,
) -> Vec<DrawCommand> {
    let mut commands = vec![
        DrawCommand::text(x, top, label, FontRole::Bold, 8.0, MUTED),
        DrawCommand::text(x, top - 15.0, name, FontRole::Bold, 11.0, INK),
    ];
    commands.extend(
        address
            .iter()
            .take(max_lines)
            .enumerate()
            .map(|(i, line)| {
                DrawCommand::text(x, top - 28.0 - i as f32 * 12.0, line.clone(), FontRole::Regular, 9.0, INK)
            }),
    );
    commands
}

fn metadata_column(ctx: &PaintContext<'_>, doc: &InvoiceDocument, top: f32) -> Vec<DrawCommand> {
    let mut rows: Vec<(&str, String)> = vec![
        ("Invoice No.", doc.invoice_number.clone()),
        ("Issue Date", doc.issue_date.clone()),
        ("Currency", doc.currency_code.clone()),
    ];
    if let Some(project) = &doc.project_name {
        rows.push(("Project", project.clone()));
    }
    if let Some(duration) = &doc.duration {
        rows.push(("Duration", duration.clone()));
    }
    let status = if doc.is_paid { "PAID" } else { "DUE" };
    rows.push(("Status", status.to_string()));

    let x = ctx.geometry.content_right - META_COLUMN_WIDTH;
    let right = ctx.geometry.content_right;
    rows.into_iter()
        .enumerate()
        .flat_map(|(i, (label, value))| {
            let baseline = top - i as f32 * META_ROW_HEIGHT;
            [
                DrawCommand::text(x, baseline, label, FontRole::Regular, 8.5, MUTED),
                ctx.right_aligned(right, baseline, value, FontRole::Bold, 9.0, INK),
            ]
        })
        .collect()
}

/// Shaded `DESCRIPTION` / `AMOUNT` bar at the top of the item table.
pub fn column_header_commands(ctx: &PaintContext<'_>, page_index: usize) -> Vec<DrawCommand> {
    let geometry = &ctx.geometry;
    let height = ctx.config.column_header_height;
    let top = geometry.column_header_top(page_index, ctx.config);
    let size = 8.5;
    let baseline = top - height / 2.0 - size * 0.35;

    vec![
        DrawCommand::meta(meta::COLUMN_HEADER, (page_index + 1).to_string()),
        DrawCommand::Rect {
            rect: Rect::new(geometry.content_left, top - height, geometry.content_width(), height),
            fill: Some(SHADE),
            stroke: None,
        },
        DrawCommand::text(geometry.text_x, baseline, "DESCRIPTION", FontRole::Bold, size, INK),
        ctx.right_aligned(geometry.amount_right, baseline, "AMOUNT", FontRole::Bold, size, INK),
    ]
}

/// Footer for one page. Depends only on the page index, the invoice number
/// and configuration, so every page's footer can be produced independently.
pub fn footer_commands(
    ctx: &PaintContext<'_>,
    page_index: usize,
    invoice_number: &str,
) -> Vec<DrawCommand> {
    let geometry = &ctx.geometry;
    let footer_top = ctx.config.footer_height;
    let page_label = format!("Page {}", page_index + 1);

    let mut commands = vec![
        DrawCommand::meta(meta::FOOTER, (page_index + 1).to_string()),
        DrawCommand::hline(
            geometry.content_left,
            geometry.content_right,
            footer_top - 12.0,
            0.5,
            RULE,
        ),
        DrawCommand::text(
            geometry.content_left,
            footer_top - 26.0,
            format!("Invoice {}", invoice_number),
            FontRole::Regular,
            8.0,
            MUTED,
        ),
        ctx.right_aligned(
            geometry.content_right,
            footer_top - 26.0,
            page_label,
            FontRole::Regular,
            8.0,
            MUTED,
        ),
    ];
    if let Some(note) = ctx.config.footer_note.as_deref().filter(|n| !n.trim().is_empty()) {
        commands.push(ctx.centered(
            (geometry.content_left + geometry.content_right) / 2.0,
            footer_top - 38.0,
            note,
            FontRole::Regular,
            7.5,
            MUTED,
        ));
    }
    commands
}
