use crate::helpers::{self, font_resource_name};
use crate::writer::StreamingPdfWriter;
use ledgerprint_layout::text::to_win_ansi;
use ledgerprint_layout::{Canvas, FontLibrary, FontRole, ImageResource, Page};
use ledgerprint_render_core::{DocumentInfo, DocumentRenderer, RenderError, serialize_canvas};
use ledgerprint_types::Size;
use log::debug;
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{Cursor, Seek, Write};

const PDF_VERSION: &str = "1.7";

/// A PDF renderer that buffers lopdf objects and writes them in id order.
pub struct LopdfRenderer<W: Write + Seek> {
    writer: Option<StreamingPdfWriter<W>>,
    fonts: FontLibrary,
    image_names: BTreeMap<String, String>,
    page_ids: Vec<ObjectId>,
}

impl<W: Write + Seek> LopdfRenderer<W> {
    pub fn new(fonts: FontLibrary) -> Self {
        Self {
            writer: None,
            fonts,
            image_names: BTreeMap::new(),
            page_ids: Vec::new(),
        }
    }

    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    fn writer_mut(&mut self, operation: &'static str) -> Result<&mut StreamingPdfWriter<W>, RenderError> {
        self.writer
            .as_mut()
            .ok_or(RenderError::NotStarted(operation))
    }

    fn font_resources(&self, writer: &mut StreamingPdfWriter<W>) -> Result<Dictionary, RenderError> {
        let mut font_dict = Dictionary::new();
        for role in [FontRole::Regular, FontRole::Bold] {
            let face = self.fonts.face(role);
            let dict = match helpers::embedded_source(face) {
                None => helpers::standard_font_dict(face),
                Some(embedded) => {
                    let objects = helpers::embedded_font_objects(face, embedded)?;
                    let file_id = writer.buffer_object(objects.font_file.into());
                    let mut descriptor = objects.descriptor;
                    descriptor.set("FontFile2", file_id);
                    let descriptor_id = writer.buffer_object(descriptor.into());
                    let mut font = objects.font;
                    font.set("FontDescriptor", descriptor_id);
                    font
                }
            };
            font_dict.set(font_resource_name(role), Object::Dictionary(dict));
        }
        Ok(font_dict)
    }
}

impl<W: Write + Seek> DocumentRenderer<W> for LopdfRenderer<W> {
    fn begin_document(&mut self, writer: W, info: &DocumentInfo) -> Result<(), RenderError> {
        let mut writer = StreamingPdfWriter::new(writer, PDF_VERSION)?;
        let font_dict = self.font_resources(&mut writer)?;
        writer.set_resource("Font", font_dict);
        writer.set_info(dictionary! {
            "Title" => Object::String(to_win_ansi(&info.title), StringFormat::Literal),
            "Producer" => Object::String(to_win_ansi(&info.producer), StringFormat::Literal),
        });
        self.writer = Some(writer);
        self.image_names.clear();
        self.page_ids.clear();
        Ok(())
    }

    fn add_images(&mut self, images: &BTreeMap<String, ImageResource>) -> Result<(), RenderError> {
        if images.is_empty() {
            return Ok(());
        }
        let mut xobjects = Dictionary::new();
        let mut names = BTreeMap::new();
        let writer = self.writer_mut("add_images")?;
        for (index, (id, image)) in images.iter().enumerate() {
            let name = format!("Im{}", index + 1);
            let stream = helpers::image_xobject(id, image)?;
            let object_id = writer.buffer_object(stream.into());
            xobjects.set(name.as_bytes(), object_id);
            debug!("Registered image '{}' as /{} ({}x{})", id, name, image.width, image.height);
            names.insert(id.clone(), name);
        }
        writer.set_resource("XObject", xobjects);
        self.image_names = names;
        Ok(())
    }

    fn render_page(&mut self, page: &Page, page_size: Size) -> Result<ObjectId, RenderError> {
        let content = helpers::page_content(page, &self.image_names);
        let compressed = helpers::deflate(&content.encode()?)?;
        let writer = self.writer_mut("render_page")?;
        let content_id = writer.buffer_object(
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed).into(),
        );
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_size.width.into(), page_size.height.into()],
            "Contents" => content_id,
            "Resources" => writer.resources_id,
        };
        let page_id = writer.buffer_object(page_dict.into());
        writer.push_page(page_id);
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    fn finish(mut self: Box<Self>) -> Result<W, RenderError> {
        let writer = self
            .writer
            .take()
            .ok_or(RenderError::NotStarted("finish"))?;
        debug!("Finishing PDF with {} page(s)", writer.page_count());
        Ok(writer.finish()?)
    }
}

/// Serializes `canvas` into an in-memory PDF.
pub fn render_canvas_to_vec(
    canvas: &Canvas,
    fonts: &FontLibrary,
    info: &DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let renderer = Box::new(LopdfRenderer::new(fonts.clone()));
    let cursor = serialize_canvas(renderer, canvas, info, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}
