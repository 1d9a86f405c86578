//! Async and batch front-ends over a shared `InvoiceGenerator`.

use ledgerprint_core::{InvoiceGenerator, InvoiceInput, PipelineError};
use ledgerprint_types::InvoiceDocument;
use log::debug;
use std::io;
use std::sync::Arc;
use tokio::task;

#[cfg(feature = "rayon-executor")]
use rayon::prelude::*;

/// Shares one generator across tasks. Every call renders independently;
/// nothing is cached between invoices.
#[derive(Debug, Clone)]
pub struct InvoiceService {
    generator: Arc<InvoiceGenerator>,
}

impl InvoiceService {
    pub fn new(generator: InvoiceGenerator) -> Self {
        Self::from_shared(Arc::new(generator))
    }

    pub fn from_shared(generator: Arc<InvoiceGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &InvoiceGenerator {
        &self.generator
    }

    /// Renders on tokio's blocking pool so callers on the async runtime
    /// are never stalled by layout or compression.
    pub async fn render(&self, input: InvoiceInput) -> Result<Vec<u8>, PipelineError> {
        let generator = Arc::clone(&self.generator);
        task::spawn_blocking(move || generator.render(input))
            .await
            .map_err(join_error)?
    }

    pub async fn render_document(&self, doc: InvoiceDocument) -> Result<Vec<u8>, PipelineError> {
        let generator = Arc::clone(&self.generator);
        task::spawn_blocking(move || generator.render_document(&doc))
            .await
            .map_err(join_error)?
    }

    /// One result per input, in input order.
    pub fn render_batch(&self, inputs: Vec<InvoiceInput>) -> Vec<Result<Vec<u8>, PipelineError>> {
        debug!("Rendering batch of {} invoice(s)", inputs.len());
        let generator = &self.generator;

        #[cfg(feature = "rayon-executor")]
        let results = inputs.into_par_iter().map(|input| generator.render(input)).collect();

        #[cfg(not(feature = "rayon-executor"))]
        let results = inputs.into_iter().map(|input| generator.render(input)).collect();

        results
    }

    /// Like [`render_batch`](Self::render_batch) for already normalized documents.
    pub fn render_documents(&self, docs: &[InvoiceDocument]) -> Vec<Result<Vec<u8>, PipelineError>> {
        let generator = &self.generator;

        #[cfg(feature = "rayon-executor")]
        let results = docs.par_iter().map(|doc| generator.render_document(doc)).collect();

        #[cfg(not(feature = "rayon-executor"))]
        let results = docs.iter().map(|doc| generator.render_document(doc)).collect();

        results
    }
}

fn join_error(err: task::JoinError) -> PipelineError {
    PipelineError::Io(io::Error::other(format!("render task failed: {}", err)))
}
