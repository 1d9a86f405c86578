//! Turns either input shape into the canonical `InvoiceDocument`.

use crate::error::ValidationError;
use crate::input::{
    InvoiceInput, LegacyInvoiceInput, LineItemInput, ModernInvoiceInput, TotalsInput,
};
use chrono::{DateTime, Local, NaiveDate};
use ledgerprint_types::{InvoiceDocument, LineItem, Totals};
use log::{debug, warn};

const DEFAULT_LEGACY_CURRENCY: &str = "GBP";
const DEFAULT_CATEGORY: &str = "Transaction";
const DEFAULT_CLIENT: &str = "Customer";
const DRAFT_NUMBER: &str = "INV-DRAFT";
const TOTAL_TOLERANCE: f64 = 0.005;

/// Normalizes invoice input against a fixed "today".
///
/// `today` only matters when the input carries no issue date; pinning it
/// makes output reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    today: NaiveDate,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn normalize(&self, input: InvoiceInput) -> Result<InvoiceDocument, ValidationError> {
        let doc = match input {
            InvoiceInput::Legacy(legacy) => self.normalize_legacy(legacy)?,
            InvoiceInput::Modern(modern) => self.normalize_modern(modern)?,
        };
        debug!(
            "Normalized invoice {} ({} line items, total {})",
            doc.invoice_number,
            doc.line_items.len(),
            doc.totals.total
        );
        Ok(doc)
    }

    fn normalize_modern(&self, input: ModernInvoiceInput) -> Result<InvoiceDocument, ValidationError> {
        let currency_code = normalize_currency(&input.currency)?;
        let line_items = convert_line_items(input.line_items)?;
        let totals = resolve_totals(input.totals, &line_items)?;
        let (issue_date, parsed) = self.issue_date(input.invoice_date.as_deref());

        let metadata = input.metadata;
        let invoice_number = non_blank(metadata.invoice_number)
            .unwrap_or_else(|| number_from_date(parsed));

        Ok(InvoiceDocument {
            client: metadata.client.trim().to_string(),
            counterparty_address_lines: metadata
                .client_address
                .map(|address| address.lines())
                .unwrap_or_default(),
            invoice_number,
            issue_date,
            currency_code,
            line_items,
            totals,
            is_paid: input.is_paid,
            project_name: non_blank(metadata.project),
            duration: non_blank(metadata.duration),
            notes: non_blank(metadata.notes),
        })
    }

    fn normalize_legacy(&self, input: LegacyInvoiceInput) -> Result<InvoiceDocument, ValidationError> {
        let tx = input.transaction;
        let currency_code = match tx.currency.as_deref() {
            Some(code) => normalize_currency(code)?,
            None => DEFAULT_LEGACY_CURRENCY.to_string(),
        };

        let category = non_blank(tx.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let tx_date = tx.date.as_deref().and_then(parse_date);
        let period = non_blank(tx.period).or_else(|| tx_date.map(|d| d.format("%B %Y").to_string()));
        let title = match period {
            Some(period) => format!("{} - {}", category, period),
            None => category,
        };

        let item = LineItemInput {
            title,
            description: tx.description,
            details: Vec::new(),
            amount: tx.amount,
        };
        let line_items = convert_line_items(vec![item])?;
        let totals = resolve_totals(None, &line_items)?;

        let date_source = input.invoice_date.as_deref().or(tx.date.as_deref());
        let (issue_date, parsed) = self.issue_date(date_source);
        let invoice_number = non_blank(input.invoice_number)
            .or_else(|| tx.id.map(|id| format!("INV-{}", id)))
            .unwrap_or_else(|| number_from_date(parsed));

        Ok(InvoiceDocument {
            client: non_blank(tx.counterparty).unwrap_or_else(|| DEFAULT_CLIENT.to_string()),
            counterparty_address_lines: tx
                .counterparty_address
                .map(|address| address.lines())
                .unwrap_or_default(),
            invoice_number,
            issue_date,
            currency_code,
            line_items,
            totals,
            is_paid: input.is_paid,
            project_name: non_blank(tx.project_name),
            duration: None,
            notes: None,
        })
    }

    /// Display string for the issue date plus the parsed date, if any.
    /// Unparsable strings are shown verbatim.
    fn issue_date(&self, raw: Option<&str>) -> (String, Option<NaiveDate>) {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match parse_date(raw) {
                Some(date) => (display_date(date), Some(date)),
                None => {
                    debug!("Issue date '{}' is not ISO-8601; displaying as given", raw);
                    (raw.to_string(), None)
                }
            },
            None => (display_date(self.today), Some(self.today)),
        }
    }
}

/// Normalizes with today's local date.
pub fn normalize(input: InvoiceInput) -> Result<InvoiceDocument, ValidationError> {
    Normalizer::new().normalize(input)
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub fn display_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

fn number_from_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("INV-{}", date.format("%Y%m%d")),
        None => DRAFT_NUMBER.to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_currency(code: &str) -> Result<String, ValidationError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(ValidationError::MissingCurrency);
    }
    Ok(code)
}

fn convert_line_items(items: Vec<LineItemInput>) -> Result<Vec<LineItem>, ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyLineItems);
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.amount.is_finite() {
                return Err(ValidationError::NonFiniteAmount {
                    index,
                    title: item.title,
                });
            }
            let details = item
                .details
                .into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect();
            Ok(LineItem {
                title: item.title.trim().to_string(),
                description: non_blank(item.description),
                details,
                amount: item.amount,
            })
        })
        .collect()
}

fn check_finite(value: Option<f64>, field: &'static str) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::NonFiniteTotal { field }),
        other => Ok(other),
    }
}

/// Explicit totals win. Without an explicit `total` the breakdown is used
/// when it has a subtotal, otherwise the sum of line amounts.
fn resolve_totals(input: Option<TotalsInput>, items: &[LineItem]) -> Result<Totals, ValidationError> {
    let sum: f64 = items.iter().map(|item| item.amount).sum();
    let Some(input) = input else {
        return Ok(Totals::total_only(sum));
    };

    let subtotal = check_finite(input.subtotal, "subtotal")?;
    let discount = check_finite(input.discount, "discount")?;
    let tax = check_finite(input.tax, "tax")?;
    let tax_rate_percent = check_finite(input.tax_rate_percent, "taxRatePercent")?;
    let explicit = check_finite(input.total, "total")?;

    let total = match (explicit, subtotal) {
        (Some(total), _) => {
            if (total - sum).abs() > TOTAL_TOLERANCE {
                warn!(
                    "Explicit total {:.2} differs from the sum of line items {:.2}; keeping the explicit total",
                    total, sum
                );
            }
            total
        }
        (None, Some(subtotal)) => {
            subtotal - discount.map(f64::abs).unwrap_or(0.0) + tax.unwrap_or(0.0)
        }
        (None, None) => sum,
    };

    Ok(Totals {
        subtotal,
        discount,
        tax,
        tax_rate_percent,
        total,
    })
}
