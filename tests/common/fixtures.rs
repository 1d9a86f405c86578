use serde_json::{Value, json};

/// Modern-shape invoice with `count` items worth `(i + 1) * 10` each.
pub fn modern_invoice(count: usize, details_per_item: usize) -> Value {
    let line_items: Vec<Value> = (0..count)
        .map(|i| {
            let details: Vec<String> = (0..details_per_item)
                .map(|d| format!("Deliverable {} for item {}", d + 1, i + 1))
                .collect();
            json!({
                "title": format!("Line item {}", i + 1),
                "description": "Work carried out during the billing period",
                "details": details,
                "amount": (i + 1) as f64 * 10.0
            })
        })
        .collect();

    json!({
        "metadata": {
            "client": "Acme Ltd",
            "invoiceNumber": "INV-2024-001",
            "clientAddress": ["1 High Street", "Leeds", "LS1 1AA"]
        },
        "currency": "GBP",
        "lineItems": line_items,
        "invoiceDate": "2024-03-01"
    })
}

/// Single item worth exactly 100.00 GBP.
pub fn single_item_invoice() -> Value {
    json!({
        "metadata": { "client": "Acme Ltd", "invoiceNumber": "INV-A" },
        "currency": "GBP",
        "lineItems": [{ "title": "Consulting", "amount": 100.0 }],
        "invoiceDate": "2024-03-01"
    })
}

pub fn with_paid(mut invoice: Value, paid: bool) -> Value {
    invoice["isPaid"] = json!(paid);
    invoice
}

pub fn legacy_invoice() -> Value {
    json!({
        "transaction": {
            "id": 981,
            "amount": 1250.5,
            "currency": "usd",
            "category": "Retainer",
            "period": "March 2024",
            "counterparty": "Globex Corporation",
            "counterpartyAddress": "42 Industrial Way\nSpringfield"
        },
        "isPaid": false,
        "invoiceDate": "2024-03-31"
    })
}
