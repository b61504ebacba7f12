//! Map a UI text selection back onto canonical answer offsets.

use serde::{Deserialize, Serialize};

use super::error::ResolutionFailure;
use super::normalize::{char_find, char_len, char_slice, normalize, normalize_prefix};
use super::{AnswerLabel, Highlight, Offsets};

/// What the UI boundary captured about a selection, once, at mouse-up.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    /// The raw selected text as the browser reports it.
    pub selection_text: String,
    /// Raw text content from the start of the answer container up to the
    /// selection start. `None` when the selection started outside it.
    pub preceding_text: Option<String>,
    /// The selection's common ancestor sits inside a highlighted run.
    pub inside_highlight: bool,
}

impl SelectionSnapshot {
    pub fn new(selection_text: impl Into<String>, preceding_text: Option<String>) -> Self {
        Self {
            selection_text: selection_text.into(),
            preceding_text,
            inside_highlight: false,
        }
    }
}

/// Resolve `snapshot` to a `[start, end)` range in `canonical`.
///
/// The preceding-text measurement is tried first; if it does not land on
/// the selected text, the first occurrence of the selection is used.
pub fn resolve(
    snapshot: &SelectionSnapshot,
    canonical: &str,
    existing: &[Highlight],
    label: Option<&AnswerLabel>,
) -> Result<Offsets, ResolutionFailure> {
    let selection = normalize(&snapshot.selection_text);
    if selection.is_empty() {
        return Err(ResolutionFailure::EmptySelection);
    }
    if snapshot.inside_highlight {
        return Err(ResolutionFailure::InsideHighlight);
    }
    let selection_len = char_len(&selection);
    let canonical_len = char_len(canonical);

    let measured = snapshot
        .preceding_text
        .as_deref()
        .map(|preceding| measure_start(preceding, &snapshot.selection_text, label))
        .map(|start| Offsets { start, end: start + selection_len })
        .filter(|o| {
            o.start < o.end
                && o.end <= canonical_len
                && char_slice(canonical, o.start, o.end).contains(selection.as_str())
        });

    let offsets = match measured {
        Some(o) => o,
        None => {
            let start = char_find(canonical, &selection)
                .ok_or_else(|| ResolutionFailure::NotFound { selection: selection.clone() })?;
            tracing::debug!(start, "selection offsets resolved by substring search");
            Offsets { start, end: start + selection_len }
        }
    };

    if existing.iter().any(|h| h.offsets().contains(&offsets)) {
        return Err(ResolutionFailure::InsideHighlight);
    }
    Ok(offsets)
}

fn measure_start(preceding: &str, raw_selection: &str, label: Option<&AnswerLabel>) -> usize {
    let leading_ws: String = raw_selection.chars().take_while(|c| c.is_whitespace()).collect();
    let prefix = normalize_prefix(&format!("{preceding}{leading_ws}"));
    let prefix = match label {
        Some(label) => match prefix.strip_prefix(label.text.as_str()) {
            Some(rest) => rest.trim_start(),
            None => prefix.as_str(),
        },
        None => prefix.as_str(),
    };
    char_len(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::HighlightId;

    const OSMOSIS: &str = "Osmosis is the movement of water molecules.";

    #[test]
    fn test_resolve_primary_path() {
        let snapshot = SelectionSnapshot::new("movement of water", Some("Osmosis is the ".to_string()));
        let offsets = resolve(&snapshot, OSMOSIS, &[], None).unwrap();
        assert_eq!(offsets, Offsets { start: 15, end: 32 });
        assert_eq!(char_slice(OSMOSIS, offsets.start, offsets.end), "movement of water");
    }

    #[test]
    fn test_resolve_strips_label_and_raw_whitespace() {
        let label = AnswerLabel::default();
        let snapshot = SelectionSnapshot::new(
            "movement\n of water",
            Some("Answer: Osmosis \n is the ".to_string()),
        );
        let offsets = resolve(&snapshot, OSMOSIS, &[], Some(&label)).unwrap();
        assert_eq!(offsets, Offsets { start: 15, end: 32 });
    }

    #[test]
    fn test_resolve_leading_space_in_selection() {
        let snapshot = SelectionSnapshot::new(" water", Some("Osmosis is the movement of".to_string()));
        let offsets = resolve(&snapshot, OSMOSIS, &[], None).unwrap();
        assert_eq!(char_slice(OSMOSIS, offsets.start, offsets.end), "water");
    }

    #[test]
    fn test_resolve_falls_back_to_search() {
        // preceding text drifted: measured start lands on the wrong text
        let snapshot = SelectionSnapshot::new("water", Some("Osmosis".to_string()));
        let offsets = resolve(&snapshot, OSMOSIS, &[], None).unwrap();
        assert_eq!(offsets, Offsets { start: 27, end: 32 });

        let snapshot = SelectionSnapshot::new("molecules.", None);
        let offsets = resolve(&snapshot, OSMOSIS, &[], None).unwrap();
        assert_eq!(offsets, Offsets { start: 33, end: 43 });
    }

    #[test]
    fn test_resolve_failures() {
        let empty = SelectionSnapshot::new("  \n ", Some(String::new()));
        assert_eq!(resolve(&empty, OSMOSIS, &[], None), Err(ResolutionFailure::EmptySelection));

        let missing = SelectionSnapshot::new("diffusion", None);
        assert_eq!(
            resolve(&missing, OSMOSIS, &[], None),
            Err(ResolutionFailure::NotFound { selection: "diffusion".to_string() })
        );

        let mut flagged = SelectionSnapshot::new("water", None);
        flagged.inside_highlight = true;
        assert_eq!(resolve(&flagged, OSMOSIS, &[], None), Err(ResolutionFailure::InsideHighlight));
    }

    #[test]
    fn test_resolve_inside_existing_highlight() {
        let existing = [Highlight::new(HighlightId(1), 15, 32, "movement of water").unwrap()];
        let inner = SelectionSnapshot::new("of wat", Some("Osmosis is the movement ".to_string()));
        assert_eq!(resolve(&inner, OSMOSIS, &existing, None), Err(ResolutionFailure::InsideHighlight));

        let same = SelectionSnapshot::new("movement of water", Some("Osmosis is the ".to_string()));
        assert_eq!(resolve(&same, OSMOSIS, &existing, None), Err(ResolutionFailure::InsideHighlight));

        // partial overlap is allowed
        let partial = SelectionSnapshot::new("water molecules", Some("Osmosis is the movement of ".to_string()));
        assert_eq!(resolve(&partial, OSMOSIS, &existing, None), Ok(Offsets { start: 27, end: 42 }));
    }
}
