//! Answer highlighting: offsets, persistence and rendering.
//!
//! The pipeline for one user action is
//! `SelectionSnapshot -> resolve -> HighlightStore -> render_markup`,
//! driven by [`mutate::HighlightMutator`].

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub mod error;
pub mod mutate;
pub mod normalize;
pub mod render;
pub mod resolve;
pub mod store;

pub use error::{HighlightError, ResolutionFailure, StorageError};
pub use mutate::{HighlightMutator, Rendered};
pub use normalize::normalize;
pub use render::{render_markup, render_segments, HighlightSegment};
pub use resolve::{resolve, SelectionSnapshot};
pub use store::{HighlightStorage, HighlightStore, MemoryStorage, Persistence};

use normalize::{char_len, char_slice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightId(pub u64);

impl Display for HighlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for HighlightId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(HighlightId)
    }
}

/// A `[start, end)` char range into canonical answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    pub start: usize,
    pub end: usize,
}

impl Offsets {
    pub fn contains(&self, other: &Offsets) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// One persisted highlight.
///
/// Records read back from storage are not re-validated: the answer text
/// may have changed since they were written, and the renderer copes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: HighlightId,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Highlight {
    pub fn new(id: HighlightId, start: usize, end: usize, text: impl Into<String>) -> Result<Self, HighlightError> {
        if start >= end {
            return Err(HighlightError::EmptyRange { start, end });
        }
        Ok(Self { id, start, end, text: text.into() })
    }

    /// Build a highlight and check it fits inside `canonical`.
    pub fn for_canonical(id: HighlightId, start: usize, end: usize, text: impl Into<String>, canonical: &str) -> Result<Self, HighlightError> {
        let len = char_len(canonical);
        if end > len {
            return Err(HighlightError::OutOfBounds { start, end, len });
        }
        Self::new(id, start, end, text)
    }

    pub fn offsets(&self) -> Offsets {
        Offsets { start: self.start, end: self.end }
    }

    /// Whether the recorded text still matches the canonical text at its offsets.
    pub fn matches(&self, canonical: &str) -> bool {
        self.end <= char_len(canonical) && char_slice(canonical, self.start, self.end) == self.text
    }
}

/// Label re-prepended ahead of a rendered answer, e.g. "Answer:".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLabel {
    pub text: String,
}

impl AnswerLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Markup emitted ahead of the segments. The label is trusted and not escaped.
    pub fn markup(&self) -> String {
        format!("<strong class=\"answer-label\">{}</strong> ", self.text)
    }

    /// The label as it reads in the page's text content.
    pub fn display_text(&self) -> String {
        format!("{} ", self.text)
    }
}

impl Default for AnswerLabel {
    fn default() -> Self {
        Self::new(crate::study_const::ANSWER_LABEL_TEXT)
    }
}
