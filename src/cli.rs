//! Command-line front end: `ledgerprint render <input.json> -o <out>`.

use crate::service::InvoiceService;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ledgerprint_core::assets::decode_image;
use ledgerprint_core::{GeneratorConfig, InvoiceGenerator, InvoiceInput, PipelineError};
use ledgerprint_resource::FilesystemResourceProvider;
use ledgerprint_types::InvoiceDocument;
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("{failed} of {total} invoice(s) failed")]
    BatchFailed { failed: usize, total: usize },
}

#[derive(Parser, Debug)]
#[command(name = "ledgerprint", version, about = "Render invoices to paginated PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one invoice, or a JSON array of invoices, to PDF.
    Render(RenderArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Invoice JSON (legacy or modern shape), or an array of them.
    pub input: PathBuf,

    /// Output file; a directory when the input is an array.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Generator config JSON (layout, logo and font paths).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory that logo and font paths in the config are relative to.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Logo image file, overriding any logo in the config.
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Write the normalized invoice JSON instead of a PDF.
    #[arg(long)]
    pub normalized_only: bool,

    /// Date (YYYY-MM-DD) used for invoices without one.
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render(args) => render(args).await,
    }
}

pub fn build_generator(args: &RenderArgs) -> Result<InvoiceGenerator, CliError> {
    let config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    let mut builder = InvoiceGenerator::builder().with_config(config);
    if let Some(dir) = &args.assets {
        builder = builder.with_resource_provider(Arc::new(FilesystemResourceProvider::new(dir)));
    }
    if let Some(today) = args.today {
        builder = builder.with_today(today);
    }
    if let Some(path) = &args.logo {
        match fs::read(path).map_err(|e| e.to_string()).and_then(|bytes| {
            decode_image(&bytes).map_err(|e| e.to_string())
        }) {
            Ok(logo) => builder = builder.with_logo_image(logo),
            Err(e) => warn!("Logo '{}' unavailable, using company name instead: {}", path.display(), e),
        }
    }
    Ok(builder.build()?)
}

pub async fn render(args: RenderArgs) -> Result<(), CliError> {
    let raw = fs::read_to_string(&args.input).map_err(|source| CliError::Io {
        path: args.input.clone(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(PipelineError::from)?;
    let service = InvoiceService::new(build_generator(&args)?);

    match value {
        Value::Array(items) => render_batch(&service, items, &args),
        single => render_single(&service, single, &args).await,
    }
}

async fn render_single(service: &InvoiceService, value: Value, args: &RenderArgs) -> Result<(), CliError> {
    let input: InvoiceInput = serde_json::from_value(value).map_err(PipelineError::from)?;
    let doc = service.generator().normalize(input)?;
    let bytes = if args.normalized_only {
        normalized_json(&doc)?
    } else {
        service.render_document(doc.clone()).await?
    };
    write_output(&args.output, &bytes)?;
    info!("Wrote invoice {} to {}", doc.invoice_number, args.output.display());
    Ok(())
}

fn render_batch(service: &InvoiceService, items: Vec<Value>, args: &RenderArgs) -> Result<(), CliError> {
    if items.is_empty() {
        return Err(CliError::Input("input array is empty".to_string()));
    }
    fs::create_dir_all(&args.output).map_err(|source| CliError::Io {
        path: args.output.clone(),
        source,
    })?;

    let total = items.len();
    let mut failed = 0;
    let mut docs = Vec::with_capacity(total);
    for (index, value) in items.into_iter().enumerate() {
        let parsed = serde_json::from_value::<InvoiceInput>(value)
            .map_err(PipelineError::from)
            .and_then(|input| service.generator().normalize(input));
        match parsed {
            Ok(doc) => docs.push((index, doc)),
            Err(e) => {
                warn!("Invoice #{} skipped: {}", index, e);
                failed += 1;
            }
        }
    }

    let extension = if args.normalized_only { "json" } else { "pdf" };
    let outputs: Vec<Result<Vec<u8>, PipelineError>> = if args.normalized_only {
        docs.iter().map(|(_, doc)| normalized_json(doc)).collect()
    } else {
        let plain: Vec<InvoiceDocument> = docs.iter().map(|(_, doc)| doc.clone()).collect();
        service.render_documents(&plain)
    };

    for ((index, doc), output) in docs.iter().zip(outputs) {
        match output {
            Ok(bytes) => {
                let path = args.output.join(batch_file_name(*index, &doc.invoice_number, extension));
                write_output(&path, &bytes)?;
            }
            Err(e) => {
                warn!("Invoice #{} ({}) failed: {}", index, doc.invoice_number, e);
                failed += 1;
            }
        }
    }

    info!("Rendered {} of {} invoice(s) into {}", total - failed, total, args.output.display());
    if failed > 0 {
        return Err(CliError::BatchFailed { failed, total });
    }
    Ok(())
}

fn normalized_json(doc: &InvoiceDocument) -> Result<Vec<u8>, PipelineError> {
    Ok(serde_json::to_vec_pretty(doc)?)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    fs::write(path, bytes).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `003-INV-2024_01.pdf`: index first so names stay unique and ordered.
pub fn batch_file_name(index: usize, invoice_number: &str, extension: &str) -> String {
    let safe: String = invoice_number
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{:03}-{}.{}", index, safe, extension)
}
