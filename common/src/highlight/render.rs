//! Split canonical answer text into plain and highlighted segments.

use super::{AnswerLabel, Highlight, HighlightId};
use crate::study_const::{HIGHLIGHT_CSS_CLASS, HIGHLIGHT_ID_ATTRIBUTE};

/// A contiguous run of answer text, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSegment {
    pub text: String,
    pub highlight: Option<HighlightId>,
}

#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: usize,
    end: usize,
    id: HighlightId,
}

/// Compute the segments for `canonical` under `highlights`.
///
/// Out-of-range offsets are clamped, empty ranges skipped. Where ranges
/// overlap the later-inserted highlight owns the shared characters.
pub fn render_segments(canonical: &str, highlights: &[Highlight]) -> Vec<HighlightSegment> {
    let chars: Vec<char> = canonical.chars().collect();
    let len = chars.len();
    let run = |start: usize, end: usize| chars[start..end].iter().collect::<String>();

    let mut fragments = visible_fragments(highlights, len);
    fragments.sort_by(|a, b| b.start.cmp(&a.start));

    let mut reversed = Vec::with_capacity(fragments.len() * 2 + 1);
    let mut boundary = len;
    for f in &fragments {
        if f.end < boundary {
            reversed.push(HighlightSegment { text: run(f.end, boundary), highlight: None });
        }
        reversed.push(HighlightSegment { text: run(f.start, f.end), highlight: Some(f.id) });
        boundary = f.start;
    }
    if boundary > 0 {
        reversed.push(HighlightSegment { text: run(0, boundary), highlight: None });
    }
    reversed.reverse();
    reversed
}

/// Escaped markup for `canonical` under `highlights`, with the optional
/// label placed verbatim in front.
pub fn render_markup(canonical: &str, highlights: &[Highlight], label: Option<&AnswerLabel>) -> String {
    let mut out = String::with_capacity(canonical.len() + highlights.len() * 64);
    if let Some(label) = label {
        out.push_str(&label.markup());
    }
    for segment in render_segments(canonical, highlights) {
        match segment.highlight {
            Some(id) => {
                out.push_str(&format!(
                    "<mark class=\"{HIGHLIGHT_CSS_CLASS}\" {HIGHLIGHT_ID_ATTRIBUTE}=\"{id}\">"
                ));
                out.push_str(&escape_markup(&segment.text));
                out.push_str("</mark>");
            }
            None => out.push_str(&escape_markup(&segment.text)),
        }
    }
    out
}

fn visible_fragments(highlights: &[Highlight], len: usize) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = Vec::with_capacity(highlights.len());
    for h in highlights {
        let start = h.start.min(len);
        let end = h.end.min(len);
        if start >= end {
            tracing::debug!(id = %h.id, start = h.start, end = h.end, len, "skipping highlight outside answer text");
            continue;
        }
        let mut carved = Vec::with_capacity(fragments.len() + 2);
        for f in fragments {
            if f.end <= start || end <= f.start {
                carved.push(f);
                continue;
            }
            if f.start < start {
                carved.push(Fragment { start: f.start, end: start, id: f.id });
            }
            if end < f.end {
                carved.push(Fragment { start: end, end: f.end, id: f.id });
            }
        }
        carved.push(Fragment { start, end, id: h.id });
        fragments = carved;
    }
    fragments
}

pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::normalize::char_len;

    const OSMOSIS: &str = "Osmosis is the movement of water molecules.";

    fn segments_text(segments: &[HighlightSegment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn highlighted_len(segments: &[HighlightSegment]) -> usize {
        segments.iter().filter(|s| s.highlight.is_some()).map(|s| char_len(&s.text)).sum()
    }

    fn h(id: u64, start: usize, end: usize) -> Highlight {
        Highlight::new(HighlightId(id), start, end, "").unwrap()
    }

    fn plain(text: &str) -> HighlightSegment {
        HighlightSegment { text: text.to_string(), highlight: None }
    }

    fn marked(text: &str, id: u64) -> HighlightSegment {
        HighlightSegment { text: text.to_string(), highlight: Some(HighlightId(id)) }
    }

    #[test]
    fn test_single_highlight_three_segments() {
        let segments = render_segments(OSMOSIS, &[h(1, 15, 32)]);
        assert_eq!(
            segments,
            vec![plain("Osmosis is the "), marked("movement of water", 1), plain(" molecules.")]
        );
    }

    #[test]
    fn test_two_highlights_five_segments() {
        let text = "abcdefghijklmnopqrstuvwxyz0123456789ABCD";
        assert_eq!(char_len(text), 40);
        let segments = render_segments(text, &[h(2, 20, 30), h(1, 0, 7)]);
        assert_eq!(
            segments,
            vec![
                marked("abcdefg", 1),
                plain("hijklmnopqrst"),
                marked("uvwxyz0123", 2),
                plain("456789ABCD"),
            ]
        );
        let segments = render_segments(text, &[h(1, 2, 7), h(2, 20, 30)]);
        assert_eq!(segments.len(), 5);
        assert_eq!(
            segments.iter().map(|s| s.highlight.is_some()).collect::<Vec<_>>(),
            vec![false, true, false, true, false]
        );
        assert_eq!(segments_text(&segments), text);
    }

    #[test]
    fn test_no_highlights_is_one_plain_segment() {
        assert_eq!(render_segments(OSMOSIS, &[]), vec![plain(OSMOSIS)]);
        assert!(render_segments("", &[]).is_empty());
    }

    #[test]
    fn test_clamps_drifted_highlight() {
        let segments = render_segments("short", &[h(1, 2, 40), h(2, 9, 12)]);
        assert_eq!(segments, vec![plain("sh"), marked("ort", 1)]);
    }

    #[test]
    fn test_inverted_stored_highlight_is_skipped() {
        let stale = Highlight { id: HighlightId(3), start: 4, end: 1, text: String::new() };
        assert_eq!(render_segments("short", &[stale]), vec![plain("short")]);
    }

    #[test]
    fn test_later_highlight_wins_overlap() {
        let segments = render_segments("0123456789", &[h(1, 2, 6), h(2, 4, 8)]);
        assert_eq!(
            segments,
            vec![plain("01"), marked("23", 1), marked("4567", 2), plain("89")]
        );
        let segments = render_segments("0123456789", &[h(1, 1, 9), h(2, 3, 5)]);
        assert_eq!(
            segments,
            vec![plain("0"), marked("12", 1), marked("34", 2), marked("5678", 1), plain("9")]
        );
        assert_eq!(highlighted_len(&segments), 8);
    }

    #[test]
    fn test_markup_escapes_and_prepends_label() {
        let label = AnswerLabel::new("Answer:");
        let markup = render_markup("a < b & \"c\"", &[h(7, 4, 5)], Some(&label));
        assert_eq!(
            markup,
            "<strong class=\"answer-label\">Answer:</strong> a &lt; \
             <mark class=\"study-highlight\" data-highlight-id=\"7\">b</mark> &amp; &quot;c&quot;"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let highlights = [h(1, 0, 7), h(2, 5, 12), h(3, 30, 90)];
        assert_eq!(
            render_markup(OSMOSIS, &highlights, None),
            render_markup(OSMOSIS, &highlights, None)
        );
    }
}
