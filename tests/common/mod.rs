pub mod fixtures;
pub mod pdf_assertions;

use chrono::NaiveDate;
use ledgerprint::{Canvas, InvoiceDocument, InvoiceGenerator, InvoiceInput, PipelineError};
use lopdf::Document as LopdfDocument;
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// One invoice run through every stage, keeping the intermediate results
/// so tests can assert on the canvas as well as on the PDF.
pub struct Rendered {
    pub document: InvoiceDocument,
    pub canvas: Canvas,
    pub pdf: GeneratedPdf,
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
}

pub fn generator() -> InvoiceGenerator {
    InvoiceGenerator::builder()
        .with_today(fixed_today())
        .build()
        .expect("default configuration is valid")
}

/// Normalize, lay out and render invoice JSON with the default generator.
pub fn render_json(value: &Value) -> Result<Rendered, PipelineError> {
    render_with(&generator(), value)
}

pub fn render_with(generator: &InvoiceGenerator, value: &Value) -> Result<Rendered, PipelineError> {
    let input: InvoiceInput = serde_json::from_value(value.clone())?;
    let document = generator.normalize(input)?;
    let canvas = generator.layout(&document)?;
    let bytes = generator.render_document(&document)?;
    let pdf = GeneratedPdf::from_bytes(bytes).map_err(|e| PipelineError::Config(e.to_string()))?;
    Ok(Rendered {
        document,
        canvas,
        pdf,
    })
}
