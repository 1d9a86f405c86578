mod common;

use common::fixtures::{modern_invoice, single_item_invoice, with_paid};
use common::pdf_assertions::{assert_page_chrome, extract_font_names, extract_text, has_image, page_with_meta};
use common::{TestResult, fixed_today, init_logger, render_json, render_with};
use ledgerprint::{
    GeneratorConfig, ImageResource, InMemoryResourceProvider, InvoiceGenerator, LayoutConfig, meta,
};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_single_item_invoice_renders_one_page_with_total() -> TestResult {
    init_logger();
    let rendered = render_json(&single_item_invoice())?;

    assert_eq!(rendered.pdf.page_count(), 1);
    assert_eq!(rendered.canvas.page_count(), 1);
    assert_page_chrome(&rendered.canvas);

    let totals: Vec<&str> = rendered.canvas.pages()[0].meta_values(meta::TOTALS).collect();
    assert_eq!(totals, vec!["£100.00"]);
    assert!(rendered.canvas.pages()[0].texts().any(|t| t == "£100.00"));

    let text = extract_text(&rendered.pdf.doc);
    assert!(text.contains("Consulting"), "extracted text: {text}");
    Ok(())
}

#[test]
fn test_total_equals_sum_of_amounts_without_breakdown() -> TestResult {
    let invoice = json!({
        "metadata": { "client": "Acme Ltd", "invoiceNumber": "INV-SUM" },
        "currency": "USD",
        "lineItems": [
            { "title": "A", "amount": 10.25 },
            { "title": "B", "amount": 0.5 },
            { "title": "C", "amount": 1234.75 }
        ]
    });
    let rendered = render_json(&invoice)?;

    let last = rendered.canvas.pages().last().ok_or("no pages")?;
    let totals: Vec<&str> = last.meta_values(meta::TOTALS).collect();
    assert_eq!(totals, vec!["$1245.50"]);
    Ok(())
}

#[test]
fn test_breakdown_totals_render_every_row() -> TestResult {
    let mut invoice = single_item_invoice();
    invoice["totals"] = json!({
        "subtotal": 100.0, "discount": 10.0, "tax": 18.0, "taxRatePercent": 20.0, "total": 108.0
    });
    let rendered = render_json(&invoice)?;
    let texts: Vec<&str> = rendered.canvas.pages()[0].texts().collect();
    for expected in ["Subtotal", "-£10.00", "Tax (20%)", "£18.00", "£108.00"] {
        assert!(texts.contains(&expected), "missing {expected}");
    }
    Ok(())
}

#[test]
fn test_unbreakable_detail_is_not_split() -> TestResult {
    let long_word = "x".repeat(500);
    let mut invoice = single_item_invoice();
    invoice["lineItems"][0]["details"] = json!([long_word.clone()]);
    let rendered = render_json(&invoice)?;

    let occurrences = rendered
        .canvas
        .pages()
        .iter()
        .flat_map(|page| page.texts())
        .filter(|t| t.contains('x') && t.chars().all(|c| c == 'x'))
        .collect::<Vec<_>>();
    assert_eq!(occurrences, vec![long_word.as_str()]);
    Ok(())
}

#[test]
fn test_paid_stamp_on_totals_page_only() -> TestResult {
    let rendered = render_json(&with_paid(modern_invoice(40, 3), true))?;
    assert!(rendered.canvas.page_count() > 1);

    let totals_page = page_with_meta(&rendered.canvas, meta::TOTALS).ok_or("totals not on exactly one page")?;
    let stamp_page = page_with_meta(&rendered.canvas, meta::PAID_STAMP).ok_or("stamp not on exactly one page")?;
    assert_eq!(stamp_page, totals_page);
    Ok(())
}

#[test]
fn test_no_stamp_when_unpaid_or_absent() -> TestResult {
    for invoice in [with_paid(single_item_invoice(), false), single_item_invoice()] {
        let rendered = render_json(&invoice)?;
        assert!(rendered.canvas.pages().iter().all(|page| !page.has_meta(meta::PAID_STAMP)));
        assert!(rendered.canvas.pages().iter().all(|page| page.texts().all(|t| t != "PAID")));
    }
    Ok(())
}

#[test]
fn test_undecodable_logo_falls_back_to_company_name() -> TestResult {
    init_logger();
    let provider = InMemoryResourceProvider::new().with_resource("brand/logo.png", b"not a png".to_vec());
    let config = GeneratorConfig {
        logo: Some("brand/logo.png".into()),
        layout: LayoutConfig {
            company_name: "Northwind Studio".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    let generator = InvoiceGenerator::builder()
        .with_config(config)
        .with_resource_provider(Arc::new(provider))
        .with_today(fixed_today())
        .build()?;

    let rendered = render_with(&generator, &single_item_invoice())?;
    assert_eq!(rendered.pdf.page_count(), 1);
    assert!(!has_image(&rendered.canvas));
    assert!(rendered.canvas.pages()[0].texts().any(|t| t == "Northwind Studio"));
    assert!(rendered.canvas.pages()[0].has_meta(meta::TOTALS));
    Ok(())
}

#[test]
fn test_missing_logo_falls_back_to_company_name() -> TestResult {
    let config = GeneratorConfig {
        logo: Some("nowhere.png".into()),
        ..Default::default()
    };
    let generator = InvoiceGenerator::builder()
        .with_config(config)
        .with_resource_provider(Arc::new(InMemoryResourceProvider::new()))
        .with_today(fixed_today())
        .build()?;

    let rendered = render_with(&generator, &single_item_invoice())?;
    assert!(!has_image(&rendered.canvas));
    assert!(rendered.canvas.pages()[0].texts().any(|t| t == LayoutConfig::default().company_name));
    Ok(())
}

#[test]
fn test_decoded_logo_is_drawn_and_embedded() -> TestResult {
    let logo = ImageResource {
        width: 4,
        height: 2,
        rgb: Arc::new(vec![30; 4 * 2 * 3]),
    };
    let generator = InvoiceGenerator::builder()
        .with_logo_image(logo)
        .with_today(fixed_today())
        .build()?;

    let rendered = render_with(&generator, &single_item_invoice())?;
    assert!(has_image(&rendered.canvas));
    assert!(rendered.canvas.pages()[0].has_meta(meta::LOGO));
    assert!(String::from_utf8_lossy(&rendered.pdf.bytes).contains("/Subtype /Image"));
    Ok(())
}

#[test]
fn test_logo_with_short_pixel_data_falls_back_to_company_name() -> TestResult {
    let logo = ImageResource {
        width: 10,
        height: 10,
        rgb: Arc::new(vec![0; 5]),
    };
    let generator = InvoiceGenerator::builder()
        .with_logo_image(logo)
        .with_today(fixed_today())
        .build()?;
    assert!(!generator.has_logo());

    let rendered = render_with(&generator, &single_item_invoice())?;
    assert!(!has_image(&rendered.canvas));
    assert!(rendered.canvas.pages()[0].texts().any(|t| t == LayoutConfig::default().company_name));
    Ok(())
}

#[test]
fn test_rendering_twice_is_byte_identical() -> TestResult {
    let generator = common::generator();
    let invoice = with_paid(modern_invoice(25, 2), true);
    let first = render_with(&generator, &invoice)?;
    let second = render_with(&generator, &invoice)?;
    assert_eq!(first.pdf.bytes, second.pdf.bytes);
    Ok(())
}

#[test]
fn test_standard_fonts_are_referenced_not_embedded() -> TestResult {
    let rendered = render_json(&single_item_invoice())?;
    let fonts = extract_font_names(&rendered.pdf.doc);
    assert!(fonts.contains("Helvetica"));
    assert!(fonts.contains("Helvetica-Bold"));
    assert!(!String::from_utf8_lossy(&rendered.pdf.bytes).contains("/FontFile2"));
    Ok(())
}

#[test]
fn test_empty_invoice_is_rejected_before_layout() {
    let invoice = json!({
        "metadata": { "client": "Acme Ltd" },
        "currency": "GBP",
        "lineItems": []
    });
    let err = render_json(&invoice).err().expect("empty invoice must fail");
    assert!(matches!(
        err,
        ledgerprint::PipelineError::Validation(ledgerprint::ValidationError::EmptyLineItems)
    ));
}
