//! Tax aggregation engine
//!
//! Pure, deterministic decimal computation over a set of sale/report lines.
//! Each line resolves to a tax rate (explicit id, then the default rate,
//! then 0%), contributes to exactly one per-percent bucket, and the final
//! total is rounded half-up to the whole currency unit exactly once. Bucket
//! figures stay unrounded so they always sum exactly to the aggregate tax;
//! the rounding adjustment is reported as a separate round-off figure.

use std::collections::BTreeMap;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::TaxResult;
use crate::model::{LineItem, TaxRate};

/// Per-rate aggregation used for the printed tax breakdown.
///
/// The nominal rate is split into two co-equal halves (CGST/SGST), each at
/// half the percent. `cgst + sgst == total` exactly; nothing here is rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBucket {
    pub percent: Decimal,
    pub taxable: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub total: Decimal,
}

/// Result of a tax computation over a full cart/report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSummary {
    /// Sum of taxable line amounts, unrounded
    pub subtotal: Decimal,
    /// Sum of all bucket totals, unrounded
    pub tax: Decimal,
    /// subtotal + tax, rounded half-up to the whole currency unit
    pub total: Decimal,
    /// total - (subtotal + tax); the displayed round-off line
    pub round_off: Decimal,
    /// One bucket per distinct percent, ascending
    pub buckets: Vec<TaxBucket>,
}

impl TaxSummary {
    fn empty() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            round_off: Decimal::ZERO,
            buckets: Vec::new(),
        }
    }

    /// True when any bucket actually carries tax (exclusive pricing mode).
    pub fn is_exclusive(&self) -> bool {
        self.buckets.iter().any(|b| !b.total.is_zero())
    }
}

/// Resolve the percent for a line: explicit rate id, then the default rate,
/// then 0%.
fn resolve_percent(line: &LineItem, rates: &[TaxRate]) -> Decimal {
    if let Some(id) = &line.tax_rate_id
        && let Some(rate) = rates.iter().find(|r| &r.id == id)
    {
        return rate.percent;
    }
    rates
        .iter()
        .find(|r| r.is_default)
        .map(|r| r.percent)
        .unwrap_or(Decimal::ZERO)
}

/// Compute subtotal, tax, rounded total and the per-rate buckets.
///
/// Never fails today; negative quantities are the caller's problem and
/// simply propagate through the arithmetic.
pub fn compute(lines: &[LineItem], rates: &[TaxRate]) -> TaxResult<TaxSummary> {
    if lines.is_empty() {
        return Ok(TaxSummary::empty());
    }

    let mut subtotal = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    let mut buckets: BTreeMap<Decimal, TaxBucket> = BTreeMap::new();

    for line in lines {
        let percent = resolve_percent(line, rates);
        let amount = line.amount();

        let bucket = buckets.entry(percent).or_insert_with(|| TaxBucket {
            percent,
            taxable: Decimal::ZERO,
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            total: Decimal::ZERO,
        });

        bucket.taxable += amount;
        subtotal += amount;

        if percent > Decimal::ZERO {
            // Exclusive mode: tax on top, as two co-equal half-rate components
            let half = amount * percent / Decimal::ONE_HUNDRED / Decimal::TWO;
            bucket.cgst += half;
            bucket.sgst += half;
            bucket.total += half + half;
            tax += half + half;
        }
        // Inclusive/no-tax mode: full amount to subtotal, zero tax; the line
        // still lands in the 0% bucket for reporting completeness.
    }

    let total =
        (subtotal + tax).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    tracing::debug!(
        lines = lines.len(),
        buckets = buckets.len(),
        %subtotal,
        %tax,
        %total,
        "tax computed"
    );

    Ok(TaxSummary {
        subtotal,
        tax,
        total,
        round_off: total - (subtotal + tax),
        buckets: buckets.into_values().collect(),
    })
}
