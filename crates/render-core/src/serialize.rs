use crate::error::RenderError;
use crate::traits::{DocumentInfo, DocumentRenderer};
use ledgerprint_layout::Canvas;
use log::debug;
use std::io::{Seek, Write};

/// Writes every page of `canvas` through `renderer` and returns the writer.
pub fn serialize_canvas<W: Write + Seek>(
    mut renderer: Box<dyn DocumentRenderer<W>>,
    canvas: &Canvas,
    info: &DocumentInfo,
    writer: W,
) -> Result<W, RenderError> {
    renderer.begin_document(writer, info)?;
    renderer.add_images(canvas.images())?;
    for page in canvas.pages() {
        renderer.render_page(page, canvas.page_size())?;
    }
    debug!(
        "Serialized '{}': {} page(s), {} image(s)",
        info.title,
        canvas.page_count(),
        canvas.images().len()
    );
    renderer.finish()
}
