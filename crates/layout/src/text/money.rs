//! Display formatting for monetary amounts.
//!
//! Amounts arrive already converted and rounded by the caller; formatting
//! only fixes them to two decimals for display.

use std::borrow::Cow;

const SYMBOLS: &[(&str, &str)] = &[
    ("GBP", "£"),
    ("USD", "$"),
    ("EUR", "€"),
    ("JPY", "¥"),
    ("BDT", "Tk "),
    ("INR", "Rs "),
    ("CAD", "CA$"),
    ("AUD", "A$"),
];

/// Prefix printed before an amount. Unknown codes print as `"{CODE} "`.
pub fn currency_symbol(code: &str) -> Cow<'static, str> {
    let code = code.trim();
    SYMBOLS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, symbol)| Cow::Borrowed(*symbol))
        .unwrap_or_else(|| Cow::Owned(format!("{} ", code.to_ascii_uppercase())))
}

/// Two-decimal, unsigned magnitude; non-finite values print unchanged.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    format!("{:.2}", value.abs())
}

/// `£100.00`, `-£10.00`. The sign precedes the symbol.
pub fn format_money(value: f64, currency_code: &str) -> String {
    let magnitude = format_amount(value);
    if !value.is_finite() {
        return format!("{}{}", currency_symbol(currency_code), magnitude);
    }
    let sign = if value < 0.0 && magnitude != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", sign, currency_symbol(currency_code), magnitude)
}
