//! Styled document model
//!
//! Encoders produce a flat sequence of styled line segments instead of
//! device bytes, so the transport layer can render the same document either
//! as raw ESC/POS control codes or as inline preview markup. The two
//! outputs can differ only in markup, never in content.

use serde::{Deserialize, Serialize};

use crate::layout::pad;
use crate::model::StoreIdentity;

/// Horizontal alignment of a printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Font variant of a printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontVariant {
    #[default]
    Normal,
    Condensed,
}

/// One printed line with its style flags. Styling is abstract here; the
/// transport layer turns it into control bytes or markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
    pub align: Align,
    pub font: FontVariant,
}

/// An encoded document: ordered segments, one per printed line.
/// Immutable once produced; consumed exactly once by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    segments: Vec<Segment>,
}

impl RenderedDocument {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

/// Builder used by the receipt/report encoders.
pub struct DocumentBuilder {
    width: usize,
    segments: Vec<Segment>,
}

impl DocumentBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            segments: Vec::with_capacity(64),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn push(&mut self, text: String, bold: bool, align: Align, font: FontVariant) -> &mut Self {
        self.segments.push(Segment {
            text,
            bold,
            align,
            font,
        });
        self
    }

    pub fn line(&mut self, s: &str) -> &mut Self {
        self.push(s.to_string(), false, Align::Left, FontVariant::Normal)
    }

    pub fn bold_line(&mut self, s: &str) -> &mut Self {
        self.push(s.to_string(), true, Align::Left, FontVariant::Normal)
    }

    pub fn center(&mut self, s: &str) -> &mut Self {
        self.push(s.to_string(), false, Align::Center, FontVariant::Normal)
    }

    pub fn center_bold(&mut self, s: &str) -> &mut Self {
        self.push(s.to_string(), true, Align::Center, FontVariant::Normal)
    }

    pub fn center_condensed(&mut self, s: &str) -> &mut Self {
        self.push(s.to_string(), false, Align::Center, FontVariant::Condensed)
    }

    pub fn condensed_line(&mut self, s: &str) -> &mut Self {
        self.push(s.to_string(), false, Align::Left, FontVariant::Condensed)
    }

    pub fn condensed_bold_line(&mut self, s: &str) -> &mut Self {
        self.push(s.to_string(), true, Align::Left, FontVariant::Condensed)
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Single rule: a full line of '-'
    pub fn separator(&mut self) -> &mut Self {
        let rule = "-".repeat(self.width);
        self.line(&rule)
    }

    /// Double rule: a full line of '='
    pub fn double_rule(&mut self) -> &mut Self {
        let rule = "=".repeat(self.width);
        self.line(&rule)
    }

    /// Left and right text on the same line, gap filled with spaces.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let text = join_lr(left, right, self.width);
        self.line(&text)
    }

    pub fn bold_line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let text = join_lr(left, right, self.width);
        self.bold_line(&text)
    }

    /// Store identity block: name, then whatever contact lines exist.
    /// Falls back to the fixed default identity when none is configured.
    pub fn store_block(&mut self, store: Option<&StoreIdentity>) -> &mut Self {
        let fallback = StoreIdentity::default();
        let store = store.unwrap_or(&fallback);

        self.center_bold(&store.name);
        if let Some(address) = &store.address {
            self.center(address);
        }
        if let Some(phone) = &store.phone {
            self.center(&format!("Ph: {}", phone));
        }
        if let Some(gstin) = &store.gstin {
            self.center(&format!("GSTIN: {}", gstin));
        }
        self
    }

    pub fn finish(self) -> RenderedDocument {
        RenderedDocument {
            segments: self.segments,
        }
    }
}

fn join_lr(left: &str, right: &str, width: usize) -> String {
    let lw = crate::layout::text_width(left);
    let rw = crate::layout::text_width(right);
    if lw + rw >= width {
        format!("{} {}", left, right)
    } else {
        format!("{}{}{}", left, " ".repeat(width - lw - rw), right)
    }
}

/// Build a full-width row from (text, width, align_right) column triples.
/// Every field is padded or truncated to its exact declared width.
pub(crate) fn row(columns: &[(&str, usize, bool)]) -> String {
    columns
        .iter()
        .map(|(text, width, align_right)| pad(text, *width, *align_right))
        .collect()
}
