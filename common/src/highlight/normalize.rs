//! Canonical text form used for every highlight offset.
//!
//! All offsets are counted in `char`s of the normalized text, never bytes,
//! so a selection measured in the browser lines up with the stored range.

/// Collapse every run of whitespace (newlines included) to a single space
/// and trim both ends.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`normalize`] but only trims the start.
///
/// Used for the text preceding a selection: a trailing space there is a
/// real character of the canonical text and must be counted.
pub fn normalize_prefix(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.trim_start().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    if pending_space {
        out.push(' ');
    }
    out
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` by char offsets `[start, end)`, clamped to the text.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    let start_byte = byte_at(start);
    let end_byte = byte_at(end.max(start));
    &text[start_byte..end_byte]
}

/// Char offset of the first occurrence of `needle` in `haystack`.
pub fn char_find(haystack: &str, needle: &str) -> Option<usize> {
    let byte_pos = haystack.find(needle)?;
    Some(char_len(&haystack[..byte_pos]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Osmosis\n is   the\tmovement \r\n"), "Osmosis is the movement");
        assert_eq!(normalize("a\u{00A0}\u{00A0}b"), "a b");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "plain",
            "  leading",
            "trailing  ",
            "multi\n\nline\n answer",
            "tabs\tand\u{00A0}nbsp",
            "  Ünïcödé   tëxt  ",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn test_normalize_prefix_keeps_trailing_space() {
        assert_eq!(normalize_prefix("  Osmosis  is the \n"), "Osmosis is the ");
        assert_eq!(normalize_prefix("no space"), "no space");
        assert_eq!(normalize_prefix("   "), "");
    }

    #[test]
    fn test_char_helpers_are_char_based() {
        let text = "café au lait";
        assert_eq!(char_len(text), 12);
        assert_eq!(char_slice(text, 0, 4), "café");
        assert_eq!(char_slice(text, 5, 7), "au");
        assert_eq!(char_slice(text, 8, 100), "lait");
        assert_eq!(char_slice(text, 9, 3), "");
        assert_eq!(char_find(text, "lait"), Some(8));
        assert_eq!(char_find(text, "milk"), None);
    }
}
