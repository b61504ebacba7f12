//! Add/remove operations keeping the store and rendered markup in step.

use std::collections::BTreeSet;

use super::error::HighlightError;
use super::normalize::char_slice;
use super::render::render_markup;
use super::resolve::{resolve, SelectionSnapshot};
use super::store::{HighlightStorage, HighlightStore, Persistence};
use super::{AnswerLabel, Highlight, HighlightId};
use crate::question::{Question, QuestionId};

/// Markup for one question after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub question_id: QuestionId,
    pub markup: String,
    pub persistence: Persistence,
}

/// Each operation is one read-modify-write on the store followed by a render.
pub struct HighlightMutator<'s, S: HighlightStorage> {
    store: &'s mut HighlightStore<S>,
    label: Option<AnswerLabel>,
}

impl<'s, S: HighlightStorage> HighlightMutator<'s, S> {
    pub fn new(store: &'s mut HighlightStore<S>) -> Self {
        Self { store, label: None }
    }

    pub fn with_label(mut self, label: AnswerLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Current markup for `question` without touching the store.
    pub fn render(&self, question: &Question) -> String {
        render_markup(&question.canonical_answer(), self.store.get(&question.id), self.label.as_ref())
    }

    pub fn add(&mut self, question: &Question, start: usize, end: usize, text: impl Into<String>) -> Result<Rendered, HighlightError> {
        let canonical = question.canonical_answer();
        let highlight = Highlight::for_canonical(self.next_id(), start, end, text, &canonical)?;
        tracing::info!(question = %question.id, id = %highlight.id, start, end, "highlight added");

        let mut highlights = self.store.get(&question.id).to_vec();
        highlights.push(highlight);
        let persistence = self.store.set(&question.id, highlights);
        Ok(self.rendered(question, persistence))
    }

    /// Resolve a UI selection and record it. Resolution failures are
    /// returned for the caller to drop; nothing is stored for them.
    pub fn add_selection(&mut self, question: &Question, snapshot: &SelectionSnapshot) -> Result<Rendered, HighlightError> {
        let canonical = question.canonical_answer();
        let offsets = resolve(snapshot, &canonical, self.store.get(&question.id), self.label.as_ref())
            .inspect_err(|e| tracing::debug!(question = %question.id, "selection ignored: {e}"))?;
        let text = char_slice(&canonical, offsets.start, offsets.end).to_string();
        self.add(question, offsets.start, offsets.end, text)
    }

    pub fn remove(&mut self, question: &Question, highlight_id: HighlightId) -> Rendered {
        let highlights: Vec<Highlight> = self
            .store
            .get(&question.id)
            .iter()
            .filter(|h| h.id != highlight_id)
            .cloned()
            .collect();
        tracing::info!(question = %question.id, id = %highlight_id, "highlight removed");
        let persistence = self.store.set(&question.id, highlights);
        self.rendered(question, persistence)
    }

    pub fn clear_question(&mut self, question: &Question) -> Rendered {
        tracing::info!(question = %question.id, "highlights cleared");
        let persistence = self.store.clear(&question.id);
        self.rendered(question, persistence)
    }

    /// Clear every question's highlights and re-render the visible ones.
    pub fn clear_all<'q>(&mut self, visible: impl IntoIterator<Item = &'q Question>) -> Vec<Rendered> {
        tracing::info!("all highlights cleared");
        let persistence = self.store.clear_all();
        visible
            .into_iter()
            .map(|q| self.rendered(q, persistence.clone()))
            .collect()
    }

    fn rendered(&self, question: &Question, persistence: Persistence) -> Rendered {
        Rendered {
            question_id: question.id.clone(),
            markup: self.render(question),
            persistence,
        }
    }

    fn next_id(&self) -> HighlightId {
        let used: BTreeSet<u64> = self.store.all().map(|h| h.id.0).collect();
        let Some(max) = used.last() else {
            return HighlightId(1);
        };
        match max.checked_add(1) {
            Some(next) => HighlightId(next),
            // stored data already holds u64::MAX; take the lowest free id
            None => HighlightId((1..).find(|id| !used.contains(id)).unwrap_or(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{MemoryStorage, ResolutionFailure, StorageError};
    use crate::question::Marks;
    use crate::study_const::HIGHLIGHTS_STORAGE_KEY;

    fn osmosis() -> Question {
        Question {
            id: QuestionId::from("q1"),
            question_text: "What is osmosis?".to_string(),
            answer_text: "Osmosis is the movement\n of water   molecules.".to_string(),
            marks: Marks::Two,
        }
    }

    #[test]
    fn test_add_selection_renders_highlight() {
        let q = osmosis();
        let mut store = HighlightStore::open(MemoryStorage::new());
        let mut mutator = HighlightMutator::new(&mut store);
        let snapshot = SelectionSnapshot::new("movement of water", Some("Osmosis is the ".to_string()));
        let rendered = mutator.add_selection(&q, &snapshot).unwrap();
        assert_eq!(
            rendered.markup,
            "Osmosis is the <mark class=\"study-highlight\" data-highlight-id=\"1\">movement of water</mark> molecules."
        );
        assert!(rendered.persistence.is_saved());
        assert_eq!(store.get(&q.id)[0].text, "movement of water");
    }

    #[test]
    fn test_add_rejects_out_of_bounds() {
        let q = osmosis();
        let mut store = HighlightStore::open(MemoryStorage::new());
        let mut mutator = HighlightMutator::new(&mut store);
        assert!(matches!(mutator.add(&q, 10, 400, "x"), Err(HighlightError::OutOfBounds { .. })));
        assert!(store.get(&q.id).is_empty());
    }

    #[test]
    fn test_ids_increase() {
        let q = osmosis();
        let mut store = HighlightStore::open(MemoryStorage::new());
        let mut mutator = HighlightMutator::new(&mut store);
        mutator.add(&q, 0, 7, "Osmosis").unwrap();
        mutator.add(&q, 15, 23, "movement").unwrap();
        let ids: Vec<_> = store.get(&q.id).iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![HighlightId(1), HighlightId(2)]);
    }

    #[test]
    fn test_add_after_stored_max_id_reuses_lowest_free_id() {
        let q = osmosis();
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                HIGHLIGHTS_STORAGE_KEY,
                r#"{"q1":[{"id":18446744073709551615,"start":0,"end":2,"text":"Os"},{"id":1,"start":8,"end":10,"text":"is"}]}"#,
            )
            .unwrap();
        let mut store = HighlightStore::open(storage);
        let mut mutator = HighlightMutator::new(&mut store);
        let rendered = mutator.add(&q, 4, 7, "sis").unwrap();
        assert!(rendered.persistence.is_saved());

        let ids: Vec<_> = store.get(&q.id).iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![HighlightId(u64::MAX), HighlightId(1), HighlightId(2)]);
    }

    #[test]
    fn test_selection_inside_highlight_is_ignored() {
        let q = osmosis();
        let mut store = HighlightStore::open(MemoryStorage::new());
        let mut mutator = HighlightMutator::new(&mut store);
        mutator.add(&q, 15, 32, "movement of water").unwrap();
        let inner = SelectionSnapshot::new("of", Some("Osmosis is the movement ".to_string()));
        assert_eq!(
            mutator.add_selection(&q, &inner),
            Err(HighlightError::Resolution(ResolutionFailure::InsideHighlight))
        );
        assert_eq!(store.get(&q.id).len(), 1);
    }

    #[test]
    fn test_remove_and_clear_question() {
        let q = osmosis();
        let mut store = HighlightStore::open(MemoryStorage::new());
        let mut mutator = HighlightMutator::new(&mut store).with_label(AnswerLabel::default());
        let plain = mutator.render(&q);
        mutator.add(&q, 0, 7, "Osmosis").unwrap();
        mutator.add(&q, 15, 23, "movement").unwrap();

        let rendered = mutator.remove(&q, HighlightId(1));
        assert!(rendered.markup.contains("data-highlight-id=\"2\""));
        assert!(!rendered.markup.contains("data-highlight-id=\"1\""));

        let rendered = mutator.clear_question(&q);
        assert_eq!(rendered.markup, plain);
        assert!(rendered.markup.starts_with("<strong class=\"answer-label\">Answer:</strong> "));
    }

    #[test]
    fn test_degraded_storage_still_renders() {
        let q = osmosis();
        let mut store = HighlightStore::open(MemoryStorage::unavailable());
        let mut mutator = HighlightMutator::new(&mut store);
        let rendered = mutator.add(&q, 0, 7, "Osmosis").unwrap();
        assert!(!rendered.persistence.is_saved());
        assert!(rendered.markup.contains("<mark"));
    }

    #[test]
    fn test_clear_question_reports_degraded_write() {
        let q = osmosis();
        let mut store = HighlightStore::open(MemoryStorage::unavailable());
        let mut mutator = HighlightMutator::new(&mut store);
        mutator.add(&q, 0, 7, "Osmosis").unwrap();
        let rendered = mutator.clear_question(&q);
        assert!(matches!(rendered.persistence, Persistence::Degraded(StorageError::Unavailable(_))));
        assert!(!rendered.markup.contains("<mark"));
        assert!(store.get(&q.id).is_empty());
    }
}
