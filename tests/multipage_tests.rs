mod common;

use common::fixtures::modern_invoice;
use common::pdf_assertions::{assert_page_chrome, meta_counts, page_with_meta};
use common::{TestResult, fixed_today, init_logger, render_json, render_with};
use ledgerprint::{InvoiceGenerator, LayoutConfig, meta};
use serde_json::json;

#[test]
fn test_forty_items_with_details_span_several_pages() -> TestResult {
    init_logger();
    let rendered = render_json(&modern_invoice(40, 3))?;

    assert!(rendered.canvas.page_count() > 1);
    assert_eq!(rendered.pdf.page_count(), rendered.canvas.page_count());
    assert_page_chrome(&rendered.canvas);
    Ok(())
}

#[test]
fn test_running_total_matches_sum_of_forty_items() -> TestResult {
    let rendered = render_json(&modern_invoice(40, 3))?;
    let sum: f64 = (1..=40).map(|i| i as f64 * 10.0).sum();
    assert_eq!(rendered.document.totals.total, sum);

    let totals_page = page_with_meta(&rendered.canvas, meta::TOTALS).ok_or("totals missing")?;
    assert_eq!(totals_page, rendered.canvas.page_count() - 1);
    let totals: Vec<&str> = rendered.canvas.pages()[totals_page].meta_values(meta::TOTALS).collect();
    assert_eq!(totals, vec!["£8200.00"]);
    Ok(())
}

#[test]
fn test_every_page_has_exactly_one_footer() -> TestResult {
    let rendered = render_json(&modern_invoice(60, 4))?;
    let counts = meta_counts(&rendered.canvas, meta::FOOTER);
    assert!(counts.len() > 2);
    assert!(counts.iter().all(|&c| c == 1), "footer counts {counts:?}");
    Ok(())
}

#[test]
fn test_header_only_on_first_page() -> TestResult {
    let rendered = render_json(&modern_invoice(40, 3))?;
    assert_eq!(page_with_meta(&rendered.canvas, meta::HEADER), Some(0));
    Ok(())
}

#[test]
fn test_long_bullet_list_splits_with_continuation_marker() -> TestResult {
    let details: Vec<String> = (0..120).map(|i| format!("Timesheet entry {}", i + 1)).collect();
    let invoice = json!({
        "metadata": { "client": "Acme Ltd", "invoiceNumber": "INV-LONG" },
        "currency": "EUR",
        "lineItems": [{ "title": "Support retainer", "amount": 4200.0, "details": details }],
        "invoiceDate": "2024-03-01"
    });
    let rendered = render_json(&invoice)?;

    assert!(rendered.canvas.page_count() > 1);
    let continued_pages = rendered.canvas.pages()[1..]
        .iter()
        .filter(|page| page.texts().any(|t| t.starts_with("Timesheet entry")));
    let mut checked = 0;
    for page in continued_pages {
        let markers: Vec<&str> = page.meta_values(meta::CONTINUED).collect();
        assert_eq!(markers, vec!["Support retainer"]);
        assert!(page.texts().any(|t| t == "Support retainer (continued)"));
        checked += 1;
    }
    assert!(checked >= 1);
    assert!(!rendered.canvas.pages()[0].has_meta(meta::CONTINUED));
    Ok(())
}

#[test]
fn test_continuation_marker_can_be_turned_off() -> TestResult {
    let details: Vec<String> = (0..120).map(|i| format!("Timesheet entry {}", i + 1)).collect();
    let invoice = json!({
        "metadata": { "client": "Acme Ltd" },
        "currency": "EUR",
        "lineItems": [{ "title": "Support retainer", "amount": 4200.0, "details": details }]
    });
    let generator = InvoiceGenerator::builder()
        .with_layout_config(LayoutConfig {
            continuation_marker: false,
            ..Default::default()
        })
        .with_today(fixed_today())
        .build()?;
    let rendered = render_with(&generator, &invoice)?;

    assert!(rendered.canvas.page_count() > 1);
    assert!(rendered.canvas.pages().iter().all(|page| !page.has_meta(meta::CONTINUED)));
    assert_page_chrome(&rendered.canvas);
    Ok(())
}

#[test]
fn test_notes_follow_totals_across_pages() -> TestResult {
    let mut invoice = modern_invoice(40, 3);
    invoice["metadata"]["notes"] = json!("Payment due within 30 days. Bank transfer to account 12345678.");
    let rendered = render_json(&invoice)?;

    let last = rendered.canvas.pages().last().ok_or("no pages")?;
    assert!(last.texts().any(|t| t == "NOTES"));
    assert_page_chrome(&rendered.canvas);
    Ok(())
}
