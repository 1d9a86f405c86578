//! End-to-end generation: input → document → canvas → PDF bytes.

use crate::assets;
use crate::error::PipelineError;
use crate::input::InvoiceInput;
use crate::normalize::Normalizer;
use chrono::NaiveDate;
use ledgerprint_layout::{Canvas, FontLibrary, ImageResource, LayoutConfig, LayoutEngine};
use ledgerprint_render_core::{DocumentInfo, serialize_canvas};
use ledgerprint_render_lopdf::LopdfRenderer;
use ledgerprint_traits::ResourceProvider;
use ledgerprint_types::InvoiceDocument;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use std::sync::Arc;

/// Generator settings as loaded from a JSON config file. Asset paths are
/// resolved through the builder's `ResourceProvider`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub layout: LayoutConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold_font: Option<String>,
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

/// Renders invoices with assets resolved once at build time.
///
/// Cheap to share behind an `Arc`; rendering takes `&self` and keeps no
/// state between calls.
#[derive(Debug, Clone)]
pub struct InvoiceGenerator {
    config: LayoutConfig,
    fonts: FontLibrary,
    logo: Option<ImageResource>,
    normalizer: Normalizer,
}

impl InvoiceGenerator {
    pub fn builder() -> InvoiceGeneratorBuilder {
        InvoiceGeneratorBuilder::default()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    pub fn normalize(&self, input: InvoiceInput) -> Result<InvoiceDocument, PipelineError> {
        Ok(self.normalizer.normalize(input)?)
    }

    pub fn layout(&self, doc: &InvoiceDocument) -> Result<Canvas, PipelineError> {
        let engine = LayoutEngine::new(&self.fonts, &self.config);
        Ok(engine.layout(doc, self.logo.as_ref())?)
    }

    /// Lays out `doc` and writes the PDF into `writer`.
    pub fn render_to_writer<W: Write + Seek + 'static>(
        &self,
        doc: &InvoiceDocument,
        writer: W,
    ) -> Result<W, PipelineError> {
        let canvas = self.layout(doc)?;
        let renderer = Box::new(LopdfRenderer::new(self.fonts.clone()));
        let info = DocumentInfo::new(format!("Invoice {}", doc.invoice_number));
        Ok(serialize_canvas(renderer, &canvas, &info, writer)?)
    }

    pub fn render_document(&self, doc: &InvoiceDocument) -> Result<Vec<u8>, PipelineError> {
        let bytes = self.render_to_writer(doc, Cursor::new(Vec::new()))?.into_inner();
        info!(
            "Rendered invoice {} ({} line items, {} bytes)",
            doc.invoice_number,
            doc.line_items.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    pub fn render(&self, input: InvoiceInput) -> Result<Vec<u8>, PipelineError> {
        let doc = self.normalize(input)?;
        self.render_document(&doc)
    }

    pub fn render_json(&self, json: &str) -> Result<Vec<u8>, PipelineError> {
        self.render(InvoiceInput::from_json(json)?)
    }
}

/// A builder for creating an `InvoiceGenerator`.
#[derive(Debug, Default)]
pub struct InvoiceGeneratorBuilder {
    config: GeneratorConfig,
    provider: Option<Arc<dyn ResourceProvider>>,
    fonts: Option<FontLibrary>,
    logo: Option<ImageResource>,
    today: Option<NaiveDate>,
}

impl InvoiceGeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    /// Source for the logo and font paths named in the config.
    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Uses these fonts instead of loading any from the config.
    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Uses an already decoded logo instead of loading one from the config.
    pub fn with_logo_image(mut self, logo: ImageResource) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Pins the date used for invoices that carry none.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Resolves assets and validates the layout configuration.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Layout` if the configured page cannot hold a
    /// column header plus one line. Asset problems are logged and degrade.
    pub fn build(self) -> Result<InvoiceGenerator, PipelineError> {
        let GeneratorConfig {
            layout,
            logo: logo_path,
            regular_font,
            bold_font,
        } = self.config;

        let provider = self.provider.as_deref();
        let fonts = match (self.fonts, provider) {
            (Some(fonts), _) => fonts,
            (None, Some(provider)) => {
                assets::load_fonts(provider, regular_font.as_deref(), bold_font.as_deref())
            }
            (None, None) => {
                if regular_font.is_some() || bold_font.is_some() {
                    warn!("Fonts configured but no resource provider set; using standard fonts");
                }
                FontLibrary::standard()
            }
        };

        let logo = match (self.logo, provider, logo_path) {
            (Some(logo), _, _) if logo.is_drawable() => Some(logo),
            (Some(logo), _, _) => {
                warn!(
                    "Logo image {}x{} has {} bytes of pixel data; using company name",
                    logo.width,
                    logo.height,
                    logo.rgb.len()
                );
                None
            }
            (None, Some(provider), Some(path)) => assets::load_logo(provider, &path),
            (None, None, Some(path)) => {
                warn!("Logo '{}' configured but no resource provider set; using company name", path);
                None
            }
            (None, _, None) => None,
        };

        LayoutEngine::new(&fonts, &layout).validate()?;

        let normalizer = match self.today {
            Some(today) => Normalizer::with_today(today),
            None => Normalizer::new(),
        };
        Ok(InvoiceGenerator {
            config: layout,
            fonts,
            logo,
            normalizer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use ledgerprint_layout::LayoutError;
    use ledgerprint_traits::InMemoryResourceProvider;
    use serde_json::json;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn generator() -> InvoiceGenerator {
        InvoiceGenerator::builder()
            .with_today(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .build()
            .unwrap()
    }

    fn sample_json() -> String {
        json!({
            "metadata": { "client": "Acme Ltd", "invoiceNumber": "INV-1" },
            "currency": "GBP",
            "lineItems": [{ "title": "Design", "amount": 100.0 }]
        })
        .to_string()
    }

    #[test]
    fn test_render_json_produces_pdf() {
        init_logger();
        let bytes = generator().render_json(&sample_json()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_validation_error_surfaces() {
        let json = json!({
            "metadata": { "client": "Acme Ltd" },
            "currency": "GBP",
            "lineItems": []
        })
        .to_string();
        let err = generator().render_json(&json).unwrap_err();
        assert!(matches!(err, PipelineError::Validation(ValidationError::EmptyLineItems)));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = generator().render_json("{").unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
    }

    #[test]
    fn test_invalid_layout_config_fails_build() {
        let layout = LayoutConfig {
            amount_column_width: 10_000.0,
            ..Default::default()
        };
        let err = InvoiceGenerator::builder()
            .with_layout_config(layout)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Layout(LayoutError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_logo_degrades() {
        let config = GeneratorConfig {
            logo: Some("brand/logo.png".into()),
            ..Default::default()
        };
        let generator = InvoiceGenerator::builder()
            .with_config(config)
            .with_resource_provider(Arc::new(InMemoryResourceProvider::new()))
            .build()
            .unwrap();
        assert!(!generator.has_logo());
        assert!(generator.render_json(&sample_json()).is_ok());
    }

    #[test]
    fn test_logo_loaded_from_asset_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logo = image::RgbImage::from_pixel(20, 10, image::Rgb([200, 10, 10]));
        logo.save(dir.path().join("logo.png")).unwrap();

        let config = GeneratorConfig {
            logo: Some("logo.png".into()),
            ..Default::default()
        };
        let provider = ledgerprint_resource::FilesystemResourceProvider::new(dir.path());
        let generator = InvoiceGenerator::builder()
            .with_config(config)
            .with_resource_provider(Arc::new(provider))
            .build()
            .unwrap();
        assert!(generator.has_logo());

        let bytes = generator.render_json(&sample_json()).unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/Subtype /Image"));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = GeneratorConfig::from_json(
            r##"{ "logo": "logo.png", "layout": { "companyName": "Northwind", "accentColor": "#336699" } }"##,
        )
        .unwrap();
        assert_eq!(config.logo.as_deref(), Some("logo.png"));
        assert_eq!(config.layout.company_name, "Northwind");
        assert_eq!(config.layout.margin_x, LayoutConfig::default().margin_x);
    }

    #[test]
    fn test_same_input_renders_identically() {
        let generator = generator();
        let first = generator.render_json(&sample_json()).unwrap();
        let second = generator.render_json(&sample_json()).unwrap();
        assert_eq!(first, second);
    }
}
