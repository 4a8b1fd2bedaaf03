//! Renders a sample receipt and prints the on-screen preview form.
//!
//! Run with: cargo run -p tally-printer --example preview

use tally_core::profile::{PaperProfile, PaperWidth};
use tally_core::{LineItem, PaymentMode, ReceiptEncoder, Sale, StoreIdentity, TaxRate, tax};
use tally_printer::TransportEncoder;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let rates = vec![
        TaxRate {
            id: "gst-5".to_string(),
            name: "GST 5%".to_string(),
            percent: "5".parse().unwrap(),
            is_default: true,
        },
        TaxRate {
            id: "gst-18".to_string(),
            name: "GST 18%".to_string(),
            percent: "18".parse().unwrap(),
            is_default: false,
        },
    ];

    let sale = Sale {
        bill_no: "INV-0042".to_string(),
        created_at: 1705912335000,
        store: Some(StoreIdentity {
            name: "GREEN VALLEY MART".to_string(),
            address: Some("12 Market Road, Pune".to_string()),
            phone: Some("98765 43210".to_string()),
            gstin: Some("27AAACG1234A1Z5".to_string()),
        }),
        lines: vec![
            LineItem {
                name: "Coca Cola 750ml".to_string(),
                quantity: "2".parse().unwrap(),
                unit_rate: "45".parse().unwrap(),
                mrp: "50".parse().unwrap(),
                tax_rate_id: Some("gst-18".to_string()),
            },
            LineItem {
                name: "Organic Whole Wheat Flour Pack".to_string(),
                quantity: "1".parse().unwrap(),
                unit_rate: "210".parse().unwrap(),
                mrp: "220".parse().unwrap(),
                tax_rate_id: None,
            },
            LineItem {
                name: "Almonds".to_string(),
                quantity: "0.250".parse().unwrap(),
                unit_rate: "920".parse().unwrap(),
                mrp: "920".parse().unwrap(),
                tax_rate_id: Some("gst-5".to_string()),
            },
        ],
        payment_mode: PaymentMode::Upi,
    };

    let summary = tax::compute(&sale.lines, &rates).expect("tax computation");
    let profile = PaperProfile::for_width(PaperWidth::Mm58);
    let doc = ReceiptEncoder::new(profile).encode(&sale, &summary);

    let enc = TransportEncoder::new(profile);
    println!("{}", enc.encode_for_preview(&doc));

    let bytes = enc.encode_for_device(&doc);
    tracing::info!(bytes = bytes.len(), "device payload size");
}
