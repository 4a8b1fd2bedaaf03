//! Paper profiles: fixed column grids for the two supported paper widths
//!
//! Every table's column widths sum exactly to the paper width in characters,
//! so rendered rows are always full-width with no overflow.

use serde::{Deserialize, Serialize};

/// Physical receipt paper width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperWidth {
    /// 58mm paper: 32 characters
    Mm58,
    /// 80mm paper: 48 characters
    Mm80,
}

impl PaperWidth {
    /// Parse the settings-store value ("58" / "80")
    pub fn from_setting(value: &str) -> Option<Self> {
        match value.trim() {
            "58" => Some(Self::Mm58),
            "80" => Some(Self::Mm80),
            _ => None,
        }
    }

    /// Settings-store value for this width
    pub fn as_setting(&self) -> &'static str {
        match self {
            Self::Mm58 => "58",
            Self::Mm80 => "80",
        }
    }
}

/// Item-row columns: serial, name, quantity, rate, amount.
#[derive(Debug, Clone, Copy)]
pub struct ItemColumns {
    pub serial: usize,
    pub name: usize,
    pub qty: usize,
    pub rate: usize,
    pub amount: usize,
}

/// Tax-breakdown columns: percent, taxable, the two split halves, total.
#[derive(Debug, Clone, Copy)]
pub struct TaxColumns {
    pub percent: usize,
    pub taxable: usize,
    pub cgst: usize,
    pub sgst: usize,
    pub total: usize,
}

/// Report product-summary columns: name, quantity, amount.
#[derive(Debug, Clone, Copy)]
pub struct ReportColumns {
    pub name: usize,
    pub qty: usize,
    pub amount: usize,
}

/// Column-width table for one paper width.
#[derive(Debug, Clone, Copy)]
pub struct PaperProfile {
    /// Total characters per line
    pub chars: usize,
    pub items: ItemColumns,
    pub tax: TaxColumns,
    pub report: ReportColumns,
}

/// 58mm profile (32 characters)
pub const PROFILE_58MM: PaperProfile = PaperProfile {
    chars: 32,
    items: ItemColumns {
        serial: 3,
        name: 12,
        qty: 4,
        rate: 6,
        amount: 7,
    },
    tax: TaxColumns {
        percent: 5,
        taxable: 9,
        cgst: 6,
        sgst: 6,
        total: 6,
    },
    report: ReportColumns {
        name: 18,
        qty: 6,
        amount: 8,
    },
};

/// 80mm profile (48 characters)
pub const PROFILE_80MM: PaperProfile = PaperProfile {
    chars: 48,
    items: ItemColumns {
        serial: 3,
        name: 20,
        qty: 6,
        rate: 8,
        amount: 11,
    },
    tax: TaxColumns {
        percent: 6,
        taxable: 12,
        cgst: 10,
        sgst: 10,
        total: 10,
    },
    report: ReportColumns {
        name: 28,
        qty: 8,
        amount: 12,
    },
};

impl PaperProfile {
    pub const fn for_width(width: PaperWidth) -> Self {
        match width {
            PaperWidth::Mm58 => PROFILE_58MM,
            PaperWidth::Mm80 => PROFILE_80MM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_columns_fill(profile: &PaperProfile) {
        let i = profile.items;
        assert_eq!(i.serial + i.name + i.qty + i.rate + i.amount, profile.chars);
        let t = profile.tax;
        assert_eq!(
            t.percent + t.taxable + t.cgst + t.sgst + t.total,
            profile.chars
        );
        let r = profile.report;
        assert_eq!(r.name + r.qty + r.amount, profile.chars);
    }

    #[test]
    fn test_column_widths_sum_to_paper_width() {
        assert_columns_fill(&PROFILE_58MM);
        assert_columns_fill(&PROFILE_80MM);
    }

    #[test]
    fn test_width_setting_roundtrip() {
        assert_eq!(PaperWidth::from_setting("58"), Some(PaperWidth::Mm58));
        assert_eq!(PaperWidth::from_setting(" 80 "), Some(PaperWidth::Mm80));
        assert_eq!(PaperWidth::from_setting("a4"), None);
        assert_eq!(PaperWidth::Mm58.as_setting(), "58");
    }
}
