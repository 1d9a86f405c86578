//! The canonical invoice document consumed by the layout engine.
//!
//! Whatever shape the caller supplied, the normalizer produces exactly one
//! `InvoiceDocument`. The layout engine only ever borrows it.

use serde::{Deserialize, Serialize};

/// One billable entry on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered bullet strings; may be empty.
    #[serde(default)]
    pub details: Vec<String>,
    /// Subtotal in the document's display currency.
    pub amount: f64,
}

impl LineItem {
    pub fn new(title: impl Into<String>, amount: f64) -> Self {
        Self {
            title: title.into(),
            description: None,
            details: Vec::new(),
            amount,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details = details.into_iter().map(Into::into).collect();
        self
    }
}

/// Totals block. When `subtotal`, `discount` or `tax` are present the caller
/// guarantees `total == subtotal - discount + tax`; nothing here re-checks it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate_percent: Option<f64>,
    pub total: f64,
}

impl Totals {
    pub fn total_only(total: f64) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn has_breakdown(&self) -> bool {
        self.subtotal.is_some() || self.discount.is_some() || self.tax.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub client: String,
    #[serde(default)]
    pub counterparty_address_lines: Vec<String>,
    pub invoice_number: String,
    /// Display-ready issue date.
    pub issue_date: String,
    pub currency_code: String,
    pub line_items: Vec<LineItem>,
    pub totals: Totals,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InvoiceDocument {
    /// Sum of every line item amount, before any explicit total override.
    pub fn line_item_sum(&self) -> f64 {
        self.line_items.iter().map(|item| item.amount).sum()
    }
}
