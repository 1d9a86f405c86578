use lopdf::{Dictionary, Object, ObjectId, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

/// Buffers PDF objects and writes them in id order on `finish`.
///
/// Object ids 1..=3 are reserved for the shared resources dictionary, the
/// page tree and the catalog.
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    resources: Dictionary,
    page_ids: Vec<ObjectId>,
    info: Option<Dictionary>,
    buffered_objects: BTreeMap<ObjectId, Object>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{}\n", version).as_bytes())?;
        writer.write_all(b"%\xE2\xE3\xCF\xD3\n")?;

        Ok(Self {
            writer,
            max_id: 3,
            resources_id: (1, 0),
            pages_id: (2, 0),
            catalog_id: (3, 0),
            resources: Dictionary::new(),
            page_ids: Vec::new(),
            info: None,
            buffered_objects: BTreeMap::new(),
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    pub fn buffer_object(&mut self, object: Object) -> ObjectId {
        let id = self.new_object_id();
        self.buffered_objects.insert(id, object);
        id
    }

    /// Sets one entry (`Font`, `XObject`) of the shared page resources.
    pub fn set_resource(&mut self, category: &str, entries: Dictionary) {
        self.resources.set(category, entries);
    }

    pub fn push_page(&mut self, page_id: ObjectId) {
        self.page_ids.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(info);
    }

    pub fn finish(mut self) -> io::Result<W> {
        let resources = std::mem::take(&mut self.resources);
        self.buffered_objects.insert(self.resources_id, resources.into());

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.buffered_objects.insert(self.pages_id, pages_dict.into());

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.buffered_objects.insert(self.catalog_id, catalog_dict.into());

        let info_id = self.info.take().map(|info| self.buffer_object(info.into()));

        let mut offsets = Vec::with_capacity(self.buffered_objects.len());
        for (id, object) in &self.buffered_objects {
            offsets.push((id.0, self.writer.stream_position()?));
            write!(self.writer, "{} {} obj\n", id.0, id.1)?;
            write_object(&mut self.writer, object)?;
            self.writer.write_all(b"\nendobj\n")?;
        }

        let xref_start = self.writer.stream_position()?;
        let size = self.max_id + 1;
        write_xref(&mut self.writer, size, &offsets)?;

        let mut trailer = dictionary! { "Size" => size as i64, "Root" => self.catalog_id };
        if let Some(info_id) = info_id {
            trailer.set("Info", info_id);
        }
        self.writer.write_all(b"trailer\n")?;
        write_dictionary(&mut self.writer, &trailer)?;
        write!(self.writer, "\nstartxref\n{}\n%%EOF", xref_start)?;

        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn write_xref<W: Write>(writer: &mut W, size: u32, offsets: &[(u32, u64)]) -> io::Result<()> {
    let by_id: BTreeMap<u32, u64> = offsets.iter().copied().collect();
    writeln!(writer, "xref")?;
    writeln!(writer, "0 {}", size)?;
    writer.write_all(b"0000000000 65535 f \n")?;
    for id in 1..size {
        match by_id.get(&id) {
            Some(offset) => write!(writer, "{:010} 00000 n \n", offset)?,
            None => writer.write_all(b"0000000000 65535 f \n")?,
        }
    }
    Ok(())
}

fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
    match object {
        Object::Null => writer.write_all(b"null"),
        Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
        Object::Integer(i) => write!(writer, "{}", i),
        Object::Real(r) => write!(writer, "{:.3}", r),
        Object::Name(n) => {
            writer.write_all(b"/")?;
            writer.write_all(n)
        }
        Object::String(s, format) => match format {
            StringFormat::Literal => {
                writer.write_all(b"(")?;
                for &byte in s {
                    if byte == b'(' || byte == b')' || byte == b'\\' {
                        writer.write_all(b"\\")?;
                    }
                    writer.write_all(&[byte])?;
                }
                writer.write_all(b")")
            }
            StringFormat::Hexadecimal => {
                writer.write_all(b"<")?;
                for byte in s {
                    write!(writer, "{:02X}", byte)?;
                }
                writer.write_all(b">")
            }
        },
        Object::Array(items) => {
            writer.write_all(b"[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    writer.write_all(b" ")?;
                }
                write_object(writer, item)?;
            }
            writer.write_all(b"]")
        }
        Object::Dictionary(dict) => write_dictionary(writer, dict),
        Object::Stream(stream) => {
            let mut dict = stream.dict.clone();
            dict.set("Length", stream.content.len() as i64);
            write_dictionary(writer, &dict)?;
            writer.write_all(b"\nstream\n")?;
            writer.write_all(&stream.content)?;
            writer.write_all(b"\nendstream")
        }
        Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
    }
}

/// Keys are written sorted so output does not depend on insertion order.
fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
    writer.write_all(b"<<")?;
    let sorted: BTreeMap<&Vec<u8>, &Object> = dict.iter().collect();
    for (key, value) in sorted {
        writer.write_all(b"/")?;
        writer.write_all(key)?;
        writer.write_all(b" ")?;
        write_object(writer, value)?;
        writer.write_all(b" ")?;
    }
    writer.write_all(b">>")
}
