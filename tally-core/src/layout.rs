//! Fixed-width text layout helpers
//!
//! Receipts are monospace character grids: every column field is padded or
//! truncated to its declared width, never allowed to overflow. Only item
//! names wrap, and they wrap by whole words.

/// Character width of a string (receipts are rendered in a monospace face)
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_width` characters
pub fn truncate(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to exactly `width` characters.
///
/// Left-aligned fields pad on the right, numeric fields pad on the left.
/// Longer input is truncated, so the result is always exactly `width` wide.
pub fn pad(s: &str, width: usize, align_right: bool) -> String {
    let current = text_width(s);
    if current >= width {
        return truncate(s, width);
    }
    let spaces = " ".repeat(width - current);
    if align_right {
        format!("{}{}", spaces, s)
    } else {
        format!("{}{}", s, spaces)
    }
}

/// Greedy word-wrap to `width` characters per line.
///
/// Words longer than `width` are hard-broken so no fragment ever exceeds
/// the column. Used for the receipt item-name column.
pub fn word_wrap(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in s.split_whitespace() {
        for piece in break_word(word, width) {
            let needed = if current.is_empty() {
                text_width(&piece)
            } else {
                text_width(&current) + 1 + text_width(&piece)
            };
            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&piece);
            } else {
                lines.push(std::mem::take(&mut current));
                current = piece;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap for the tabular report variant: greedy first line, then at most two
/// words per continuation line. A pair that exceeds the column falls back to
/// one word per line; no fragment is ever cut short.
pub fn word_wrap_report(s: &str, width: usize) -> Vec<String> {
    let mut wrapped = word_wrap(s, width);
    if wrapped.len() <= 1 {
        return wrapped;
    }

    let tail = wrapped.split_off(1);
    // `word_wrap` already hard-broke overlong words, so every word fits
    let rest: Vec<String> = tail
        .iter()
        .flat_map(|line| line.split_whitespace().map(str::to_string))
        .collect();

    let mut i = 0;
    while i < rest.len() {
        if i + 1 < rest.len() {
            let pair = format!("{} {}", rest[i], rest[i + 1]);
            if text_width(&pair) <= width {
                wrapped.push(pair);
                i += 2;
                continue;
            }
        }
        wrapped.push(rest[i].clone());
        i += 1;
    }
    wrapped
}

fn break_word(word: &str, width: usize) -> Vec<String> {
    if text_width(word) <= width {
        return vec![word.to_string()];
    }
    word.chars()
        .collect::<Vec<_>>()
        .chunks(width)
        .map(|c| c.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_left_and_right() {
        assert_eq!(pad("hi", 5, false), "hi   ");
        assert_eq!(pad("hi", 5, true), "   hi");
        assert_eq!(pad("hello world", 5, false), "hello");
        assert_eq!(pad("", 3, true), "   ");
    }

    #[test]
    fn test_pad_is_exact_width() {
        for s in ["", "a", "abcdef", "hello world wide"] {
            for w in [1usize, 4, 9] {
                assert_eq!(text_width(&pad(s, w, false)), w);
                assert_eq!(text_width(&pad(s, w, true)), w);
            }
        }
    }

    #[test]
    fn test_word_wrap_basic() {
        assert_eq!(word_wrap("Coca Cola", 12), vec!["Coca Cola"]);
        assert_eq!(word_wrap("Coca Cola", 6), vec!["Coca", "Cola"]);
        assert_eq!(
            word_wrap("Fresh Green Apples Premium", 12),
            vec!["Fresh Green", "Apples", "Premium"]
        );
    }

    #[test]
    fn test_word_wrap_never_overflows() {
        let name = "Extraordinary Multigrain Breakfast Cereal Family Pack";
        for width in [6usize, 10, 12, 20] {
            for line in word_wrap(name, width) {
                assert!(text_width(&line) <= width);
            }
        }
    }

    #[test]
    fn test_word_wrap_lossless() {
        let name = "Fresh Green Apples Premium Grade";
        let joined = word_wrap(name, 12).join(" ");
        assert_eq!(joined, name);
    }

    #[test]
    fn test_word_wrap_hard_breaks_long_word() {
        let lines = word_wrap("Supercalifragilistic", 8);
        assert_eq!(lines, vec!["Supercal", "ifragili", "stic"]);
    }

    #[test]
    fn test_word_wrap_report_two_words_per_continuation() {
        let lines = word_wrap_report("Fresh Green Apples Premium Grade Extra", 12);
        assert_eq!(lines[0], "Fresh Green");
        for cont in &lines[1..] {
            assert!(cont.split_whitespace().count() <= 2);
        }
    }

    #[test]
    fn test_word_wrap_report_lossless_and_in_width() {
        // An over-wide pair must fall back to one word per line, never
        // lose characters
        let name = "Fresh Green Apples Premium Grade Extra";
        for width in [8usize, 12, 17] {
            let lines = word_wrap_report(name, width);
            assert_eq!(lines.join(" "), name);
            for line in &lines {
                assert!(text_width(line) <= width);
            }
        }
    }
}
