//! App-wide study state shared through context.

use common::highlight::HighlightStore;
use common::question::QuestionBank;
use dioxus::prelude::*;

use super::local_storage::BrowserStorage;

#[derive(Clone, Copy)]
pub struct StudyState {
    pub bank: Signal<QuestionBank>,
    pub highlights: Signal<HighlightStore<BrowserStorage>>,
}

impl StudyState {
    pub fn use_provider() -> Self {
        let bank = use_signal(super::local_storage::load_question_bank);
        let highlights = use_signal(|| HighlightStore::open(BrowserStorage::open()));
        use_context_provider(move || StudyState { bank, highlights })
    }
}

pub fn use_study_state() -> StudyState {
    use_context::<StudyState>()
}
