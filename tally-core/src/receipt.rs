//! Receipt encoder
//!
//! Turns a sale plus its computed tax summary into a styled document for a
//! fixed-width paper profile. Layout contract: every column field is padded
//! or truncated to its declared width; only the item-name column wraps, by
//! whole words, with continuation rows indented and numerics left blank.

use rust_decimal::Decimal;

use crate::document::{DocumentBuilder, RenderedDocument, row};
use crate::layout::word_wrap;
use crate::model::{LineItem, Sale, format_timestamp};
use crate::profile::PaperProfile;
use crate::tax::TaxSummary;

/// Format a money figure with two decimal places
pub(crate) fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Format a quantity without trailing zeros (fractional for weighed goods)
pub(crate) fn qty_str(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Split aggregate quantity into counted items and weighed goods.
/// Whole quantities count pieces; fractional quantities are weights.
pub(crate) fn split_quantities(lines: &[LineItem]) -> (Decimal, Decimal) {
    let mut count = Decimal::ZERO;
    let mut weight = Decimal::ZERO;
    for line in lines {
        if line.quantity.fract().is_zero() {
            count += line.quantity;
        } else {
            weight += line.quantity;
        }
    }
    (count, weight)
}

pub struct ReceiptEncoder {
    profile: PaperProfile,
}

impl ReceiptEncoder {
    pub fn new(profile: PaperProfile) -> Self {
        Self { profile }
    }

    /// Encode a sale into a printable document.
    ///
    /// `summary` is the tax engine's output for the same lines; the encoder
    /// renders it and never recomputes.
    pub fn encode(&self, sale: &Sale, summary: &TaxSummary) -> RenderedDocument {
        let mut b = DocumentBuilder::new(self.profile.chars);

        b.store_block(sale.store.as_ref());
        b.separator();
        b.line_lr(
            &format!("Bill: {}", sale.bill_no),
            &format_timestamp(sale.created_at),
        );

        self.header_row(&mut b);
        for (idx, line) in sale.lines.iter().enumerate() {
            self.item_rows(&mut b, idx + 1, line);
        }
        b.separator();

        self.aggregate_block(&mut b, sale, summary);

        b.double_rule();
        b.bold_line_lr("NET AMOUNT", &money(summary.total));
        b.double_rule();

        b.line_lr("Paid By", &sale.payment_mode.to_string());
        if summary.is_exclusive() {
            b.center_condensed("GST charged extra on prices");
        } else {
            b.center_condensed("Prices are inclusive of GST");
        }

        if !summary.buckets.is_empty() {
            self.tax_table(&mut b, summary);
        }

        self.savings_block(&mut b, sale, summary);

        b.double_rule();
        b.center("Thank You! Visit Again");

        b.finish()
    }

    fn header_row(&self, b: &mut DocumentBuilder) {
        let c = self.profile.items;
        b.bold_line(&row(&[
            ("Sr", c.serial, false),
            ("Item", c.name, false),
            ("Qty", c.qty, true),
            ("Rate", c.rate, true),
            ("Amt", c.amount, true),
        ]));
        b.separator();
    }

    /// Item rows: first wrapped row carries serial and numerics; the
    /// remaining name fragments repeat indented with numerics blank.
    fn item_rows(&self, b: &mut DocumentBuilder, serial: usize, line: &LineItem) {
        let c = self.profile.items;
        // One character reserved for the continuation indent
        let wrap_width = c.name.saturating_sub(1);
        let fragments = word_wrap(&line.name, wrap_width);
        let first = fragments.first().map(String::as_str).unwrap_or("");

        b.line(&row(&[
            (&serial.to_string(), c.serial, false),
            (first, c.name, false),
            (&qty_str(line.quantity), c.qty, true),
            (&money(line.unit_rate), c.rate, true),
            (&money(line.amount()), c.amount, true),
        ]));

        for fragment in fragments.iter().skip(1) {
            let indented = format!(" {}", fragment);
            b.line(&row(&[
                ("", c.serial, false),
                (&indented, c.name, false),
                ("", c.qty, true),
                ("", c.rate, true),
                ("", c.amount, true),
            ]));
        }
    }

    fn aggregate_block(&self, b: &mut DocumentBuilder, sale: &Sale, summary: &TaxSummary) {
        let (count, weight) = split_quantities(&sale.lines);
        b.line_lr("Qty", &qty_str(count));
        if !weight.is_zero() {
            b.line_lr("Weight", &qty_str(weight));
        }
        b.line_lr("Amount", &money(summary.subtotal));
        b.line_lr("Round Off", &money(summary.round_off));
        b.line_lr("Tax", &money(summary.tax));
    }

    /// GST breakdown: one row per non-empty bucket plus a totals row.
    /// Bucket figures print unrounded-then-formatted; they always sum to
    /// the aggregate tax because the engine never rounds them.
    fn tax_table(&self, b: &mut DocumentBuilder, summary: &TaxSummary) {
        let t = self.profile.tax;
        b.condensed_bold_line(&row(&[
            ("GST%", t.percent, false),
            ("Taxable", t.taxable, true),
            ("CGST", t.cgst, true),
            ("SGST", t.sgst, true),
            ("Total", t.total, true),
        ]));

        let mut taxable = Decimal::ZERO;
        let mut cgst = Decimal::ZERO;
        let mut sgst = Decimal::ZERO;
        let mut total = Decimal::ZERO;

        for bucket in &summary.buckets {
            b.condensed_line(&row(&[
                (&format!("{}%", qty_str(bucket.percent)), t.percent, false),
                (&money(bucket.taxable), t.taxable, true),
                (&money(bucket.cgst), t.cgst, true),
                (&money(bucket.sgst), t.sgst, true),
                (&money(bucket.total), t.total, true),
            ]));
            taxable += bucket.taxable;
            cgst += bucket.cgst;
            sgst += bucket.sgst;
            total += bucket.total;
        }

        b.condensed_bold_line(&row(&[
            ("Total", t.percent, false),
            (&money(taxable), t.taxable, true),
            (&money(cgst), t.cgst, true),
            (&money(sgst), t.sgst, true),
            (&money(total), t.total, true),
        ]));
    }

    fn savings_block(&self, b: &mut DocumentBuilder, sale: &Sale, summary: &TaxSummary) {
        let mrp_total: Decimal = sale.lines.iter().map(|l| l.mrp * l.quantity).sum();
        let savings: Decimal = sale
            .lines
            .iter()
            .map(|l| (l.mrp - l.unit_rate).max(Decimal::ZERO) * l.quantity)
            .sum();

        b.line_lr("Total MRP", &money(mrp_total));
        b.line_lr("Your Price", &money(summary.subtotal + summary.tax));
        if !savings.is_zero() {
            b.bold_line_lr("You Saved", &money(savings));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PaymentMode, StoreIdentity, TaxRate};
    use crate::profile::{PROFILE_58MM, PROFILE_80MM};
    use crate::tax;

    fn sample_sale() -> Sale {
        Sale {
            bill_no: "B-0042".to_string(),
            created_at: 1705912335000,
            store: Some(StoreIdentity {
                name: "FRESH MART".to_string(),
                address: Some("12 Market Road".to_string()),
                phone: Some("98400 12345".to_string()),
                gstin: Some("33AAAAA0000A1Z5".to_string()),
            }),
            lines: vec![
                LineItem {
                    name: "Coca Cola".to_string(),
                    quantity: "2".parse().unwrap(),
                    unit_rate: "45".parse().unwrap(),
                    mrp: "50".parse().unwrap(),
                    tax_rate_id: Some("r18".to_string()),
                },
                LineItem {
                    name: "Fresh Green Apples Premium".to_string(),
                    quantity: "0.75".parse().unwrap(),
                    unit_rate: "120".parse().unwrap(),
                    mrp: "120".parse().unwrap(),
                    tax_rate_id: None,
                },
            ],
            payment_mode: PaymentMode::Cash,
        }
    }

    fn rates() -> Vec<TaxRate> {
        vec![TaxRate {
            id: "r18".to_string(),
            name: "GST 18%".to_string(),
            percent: "18".parse().unwrap(),
            is_default: false,
        }]
    }

    #[test]
    fn test_receipt_structure_order() {
        let sale = sample_sale();
        let summary = tax::compute(&sale.lines, &rates()).unwrap();
        let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);
        let texts: Vec<&str> = doc.segments().iter().map(|s| s.text.as_str()).collect();

        let pos = |needle: &str| {
            texts
                .iter()
                .position(|t| t.contains(needle))
                .unwrap_or_else(|| panic!("missing line containing {:?}", needle))
        };

        assert_eq!(pos("FRESH MART"), 0);
        assert!(pos("Bill: B-0042") < pos("Sr "));
        assert!(pos("Sr ") < pos("Coca Cola"));
        assert!(pos("Coca Cola") < pos("NET AMOUNT"));
        assert!(pos("NET AMOUNT") < pos("Paid By"));
        assert!(pos("Paid By") < pos("GST%"));
        assert!(pos("GST%") < pos("Total MRP"));
        assert!(pos("Total MRP") < pos("Thank You! Visit Again"));
        assert_eq!(pos("Thank You! Visit Again"), texts.len() - 1);
    }

    #[test]
    fn test_item_rows_are_exact_paper_width() {
        let sale = sample_sale();
        let summary = tax::compute(&sale.lines, &rates()).unwrap();
        for profile in [PROFILE_58MM, PROFILE_80MM] {
            let doc = ReceiptEncoder::new(profile).encode(&sale, &summary);
            for seg in doc.segments() {
                // Item and table rows are built from fixed columns; they must
                // fill the paper width exactly
                if seg.text.contains("Coca Cola") || seg.text.starts_with("Sr") {
                    assert_eq!(
                        seg.text.chars().count(),
                        profile.chars,
                        "row not full width: {:?}",
                        seg.text
                    );
                }
            }
        }
    }

    #[test]
    fn test_wrapped_name_is_lossless() {
        let sale = sample_sale();
        let summary = tax::compute(&sale.lines, &rates()).unwrap();
        let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);

        // Collect the name-column fragments of the wrapped item
        let c = PROFILE_58MM.items;
        let mut fragments = Vec::new();
        for seg in doc.segments() {
            let chars: Vec<char> = seg.text.chars().collect();
            if chars.len() != PROFILE_58MM.chars {
                continue;
            }
            let name_field: String = chars[c.serial..c.serial + c.name].iter().collect();
            let serial_field: String = chars[..c.serial].iter().collect();
            let is_item = serial_field.trim() == "2";
            let is_continuation =
                serial_field.trim().is_empty() && name_field.starts_with(' ') && !name_field.trim().is_empty();
            if is_item || is_continuation {
                fragments.push(name_field.trim().to_string());
            }
        }

        assert_eq!(fragments.join(" "), "Fresh Green Apples Premium");
    }

    #[test]
    fn test_continuation_rows_leave_numerics_blank() {
        let sale = sample_sale();
        let summary = tax::compute(&sale.lines, &rates()).unwrap();
        let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);
        let c = PROFILE_58MM.items;

        let continuation = doc
            .segments()
            .iter()
            .find(|s| {
                let chars: Vec<char> = s.text.chars().collect();
                chars.len() == PROFILE_58MM.chars
                    && s.text.starts_with("    ")
                    && s.text.contains("Apples")
            })
            .expect("no continuation row found");
        let chars: Vec<char> = continuation.text.chars().collect();
        let numerics: String = chars[c.serial + c.name..].iter().collect();
        assert!(numerics.trim().is_empty());
    }

    #[test]
    fn test_tax_mode_note() {
        let sale = sample_sale();

        let summary = tax::compute(&sale.lines, &rates()).unwrap();
        let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);
        assert!(
            doc.segments()
                .iter()
                .any(|s| s.text.contains("GST charged extra"))
        );

        // Same sale with no rate table: inclusive note
        let summary = tax::compute(&sale.lines, &[]).unwrap();
        let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);
        assert!(
            doc.segments()
                .iter()
                .any(|s| s.text.contains("inclusive of GST"))
        );
    }

    #[test]
    fn test_weight_row_only_for_fractional_quantities() {
        let mut sale = sample_sale();
        let summary = tax::compute(&sale.lines, &rates()).unwrap();
        let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);
        assert!(doc.segments().iter().any(|s| s.text.starts_with("Weight")));

        sale.lines.retain(|l| l.quantity.fract().is_zero());
        let summary = tax::compute(&sale.lines, &rates()).unwrap();
        let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);
        assert!(!doc.segments().iter().any(|s| s.text.starts_with("Weight")));
    }

    #[test]
    fn test_net_amount_double_ruled_and_bold() {
        let sale = sample_sale();
        let summary = tax::compute(&sale.lines, &rates()).unwrap();
        let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);
        let segments = doc.segments();

        let net = segments
            .iter()
            .position(|s| s.text.contains("NET AMOUNT"))
            .unwrap();
        assert!(segments[net].bold);
        assert!(segments[net - 1].text.chars().all(|ch| ch == '='));
        assert!(segments[net + 1].text.chars().all(|ch| ch == '='));
    }
}
