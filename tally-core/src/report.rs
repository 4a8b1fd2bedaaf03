//! Sales report encoder
//!
//! The report variant of the printed document: same store block and totals
//! figures as a receipt, but a plain product-summary table (item, qty,
//! amount) under a title/date-range header, with no payment or per-line GST
//! detail.

use rust_decimal::Decimal;

use crate::document::{DocumentBuilder, RenderedDocument, row};
use crate::layout::word_wrap_report;
use crate::model::{SalesReport, format_date};
use crate::profile::PaperProfile;
use crate::receipt::{money, qty_str, split_quantities};
use crate::tax::TaxSummary;

pub struct ReportEncoder {
    profile: PaperProfile,
}

impl ReportEncoder {
    pub fn new(profile: PaperProfile) -> Self {
        Self { profile }
    }

    pub fn encode(&self, report: &SalesReport, summary: &TaxSummary) -> RenderedDocument {
        let mut b = DocumentBuilder::new(self.profile.chars);

        b.store_block(report.store.as_ref());
        b.separator();
        b.center_bold(&report.title);
        b.center(&format!(
            "{} to {}",
            format_date(report.from_ts),
            format_date(report.to_ts)
        ));
        b.separator();

        self.header_row(&mut b);
        for line in &report.lines {
            self.product_rows(&mut b, line);
        }
        b.separator();

        let (count, weight) = split_quantities(&report.lines);
        b.line_lr("Total Qty", &qty_str(count));
        if !weight.is_zero() {
            b.line_lr("Total Weight", &qty_str(weight));
        }
        b.line_lr("Total Tax", &money(summary.tax));
        b.double_rule();
        b.bold_line_lr("TOTAL SALES", &money(summary.total));
        b.double_rule();

        b.center("Thank You!");

        b.finish()
    }

    fn header_row(&self, b: &mut DocumentBuilder) {
        let c = self.profile.report;
        b.bold_line(&row(&[
            ("Item", c.name, false),
            ("Qty", c.qty, true),
            ("Amount", c.amount, true),
        ]));
        b.separator();
    }

    /// Product rows wrap like item rows, but continuation lines carry at
    /// most two words (the tabular variant reads better that way on 58mm).
    fn product_rows(&self, b: &mut DocumentBuilder, line: &crate::model::LineItem) {
        let c = self.profile.report;
        let wrap_width = c.name.saturating_sub(1);
        let fragments = word_wrap_report(&line.name, wrap_width);
        let first = fragments.first().map(String::as_str).unwrap_or("");

        b.line(&row(&[
            (first, c.name, false),
            (&qty_str(line.quantity), c.qty, true),
            (&money(line.amount()), c.amount, true),
        ]));

        for fragment in fragments.iter().skip(1) {
            let indented = format!(" {}", fragment);
            b.line(&row(&[
                (&indented, c.name, false),
                ("", c.qty, true),
                ("", c.amount, true),
            ]));
        }
    }
}
