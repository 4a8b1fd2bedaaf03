//! Transport encodings
//!
//! Turns a rendered document into one of two wire forms: raw ESC/POS bytes
//! for the device, or plain text with inline bold markup for an on-screen
//! preview. Both walk the same segment stream, so what the preview shows
//! is exactly what the printer receives.

use tally_core::document::{Align, FontVariant, RenderedDocument, Segment};
use tally_core::profile::PaperProfile;

// ========== ESC/POS Commands ==========
const INIT: [u8; 2] = [0x1B, 0x40]; // ESC @
const ALIGN_LEFT: [u8; 3] = [0x1B, 0x61, 0x00]; // ESC a 0
const ALIGN_CENTER: [u8; 3] = [0x1B, 0x61, 0x01]; // ESC a 1
const FONT_A: [u8; 3] = [0x1B, 0x4D, 0x00]; // ESC M 0
const FONT_B: [u8; 3] = [0x1B, 0x4D, 0x01]; // ESC M 1
const BOLD_ON: [u8; 3] = [0x1B, 0x45, 0x01]; // ESC E 1
const BOLD_OFF: [u8; 3] = [0x1B, 0x45, 0x00]; // ESC E 0

/// Blank lines fed after the document so the tear-off point clears the head
const TAIL_FEED: &[u8] = b"\n\n\n\n";

/// Bold markers understood by the preview pane
pub const BOLD_OPEN: &str = "[B]";
pub const BOLD_CLOSE: &str = "[/B]";

pub struct TransportEncoder {
    profile: PaperProfile,
}

impl TransportEncoder {
    pub fn new(profile: PaperProfile) -> Self {
        Self { profile }
    }

    /// Encode the document as raw ESC/POS bytes ready for `transmit`.
    pub fn encode_for_device(&self, doc: &RenderedDocument) -> Vec<u8> {
        let mut out = Vec::with_capacity(doc.segments().len() * (self.profile.chars + 12));
        out.extend_from_slice(&INIT);

        for seg in doc.segments() {
            match seg.align {
                Align::Left => out.extend_from_slice(&ALIGN_LEFT),
                Align::Center => out.extend_from_slice(&ALIGN_CENTER),
            }
            match seg.font {
                FontVariant::Normal => out.extend_from_slice(&FONT_A),
                FontVariant::Condensed => out.extend_from_slice(&FONT_B),
            }
            if seg.bold {
                out.extend_from_slice(&BOLD_ON);
            }
            out.extend_from_slice(seg.text.as_bytes());
            if seg.bold {
                out.extend_from_slice(&BOLD_OFF);
            }
            out.push(b'\n');
        }

        out.extend_from_slice(TAIL_FEED);
        out
    }

    /// Encode the document as preview text. Centered lines are space-padded
    /// to the paper width; bold lines are wrapped in `[B]`/`[/B]`.
    pub fn encode_for_preview(&self, doc: &RenderedDocument) -> String {
        let mut lines = Vec::with_capacity(doc.segments().len());
        for seg in doc.segments() {
            lines.push(self.preview_line(seg));
        }
        lines.join("\n")
    }

    fn preview_line(&self, seg: &Segment) -> String {
        let text = match seg.align {
            Align::Left => seg.text.clone(),
            Align::Center => {
                let width = seg.text.chars().count();
                let pad = self.profile.chars.saturating_sub(width) / 2;
                format!("{}{}", " ".repeat(pad), seg.text)
            }
        };
        if seg.bold {
            format!("{BOLD_OPEN}{text}{BOLD_CLOSE}")
        } else {
            text
        }
    }
}
