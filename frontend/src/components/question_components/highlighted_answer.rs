//! Answer text with persisted highlights, selectable in highlight mode.

use common::highlight::{render_markup, AnswerLabel, HighlightError, HighlightMutator};
use common::question::Question;
use dioxus::prelude::*;

use crate::data_definitions::selection::{capture_selection, clear_selection};
use crate::data_definitions::study_state::use_study_state;

#[component]
pub fn HighlightedAnswer(question: ReadSignal<Question>, highlight_mode: ReadSignal<bool>) -> Element {
    let mut highlights = use_study_state().highlights;
    let container_id = use_memo(move || format!("x-answer-{}", question.read().id));

    // re-rendered from scratch on every store change
    let markup = use_memo(move || {
        let q = question.read();
        render_markup(&q.canonical_answer(), highlights.read().get(&q.id), Some(&AnswerLabel::default()))
    });

    let on_selection_done = move |_: Event<MouseData>| {
        if !highlight_mode() {
            return;
        }
        let Some(snapshot) = capture_selection(&container_id.read()) else {
            return;
        };
        let q = question.read().clone();
        let mut store = highlights.write();
        let mut mutator = HighlightMutator::new(&mut *store).with_label(AnswerLabel::default());
        match mutator.add_selection(&q, &snapshot) {
            Ok(rendered) => {
                clear_selection();
                if !rendered.persistence.is_saved() {
                    dioxus::logger::tracing::warn!("Highlight on {} kept for this page view only", q.id);
                }
            }
            Err(HighlightError::Resolution(e)) => {
                dioxus::logger::tracing::debug!("Selection not highlighted: {e}");
            }
            Err(e) => {
                dioxus::logger::tracing::error!("Highlight rejected: {e}");
            }
        }
    };

    let mode_class = if highlight_mode() { "highlight-mode" } else { "" };

    rsx! {
        div {
            id: "{container_id}",
            class: "{mode_class}",
            style: "
                font-size: 17px;
                line-height: 26px;
                color: #111827;
                padding: 10px 12px;
                background: white;
                border-radius: 8px;
                white-space: normal;
                word-wrap: break-word;
            ",
            onmouseup: on_selection_done,
            dangerous_inner_html: "{markup}",
        }
    }
}
