//! Highlight controls under each answer: mode toggle, per-highlight
//! removal and clearing the question.

use common::highlight::{AnswerLabel, Highlight, HighlightId, HighlightMutator};
use common::question::Question;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_content_icons::MdClear;
use dioxus_free_icons::icons::md_editor_icons::MdHighlight;

use crate::data_definitions::study_state::use_study_state;

#[component]
pub fn HighlightToolbar(question: ReadSignal<Question>, mut highlight_mode: Signal<bool>) -> Element {
    let mut highlights = use_study_state().highlights;
    let records = use_memo(move || {
        let q = question.read();
        let canonical = q.canonical_answer();
        highlights
            .read()
            .get(&q.id)
            .iter()
            .map(|h| (h.clone(), !h.matches(&canonical)))
            .collect::<Vec<_>>()
    });

    let remove = use_callback(move |highlight_id: HighlightId| {
        let q = question.read().clone();
        let mut store = highlights.write();
        let rendered = HighlightMutator::new(&mut *store).with_label(AnswerLabel::default()).remove(&q, highlight_id);
        if !rendered.persistence.is_saved() {
            dioxus::logger::tracing::warn!("Removal on {} kept for this page view only", q.id);
        }
    });

    let clear_question = move |_: Event<MouseData>| {
        let q = question.read().clone();
        let mut store = highlights.write();
        let rendered = HighlightMutator::new(&mut *store).with_label(AnswerLabel::default()).clear_question(&q);
        if !rendered.persistence.is_saved() {
            dioxus::logger::tracing::warn!("Clearing {} kept for this page view only", q.id);
        }
    };

    let toggle_color = if highlight_mode() { "#f59e0b" } else { "rgba(0,0,0,0.6)" };
    let toggle_label = if highlight_mode() { "Highlighting: on" } else { "Highlight" };

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                gap: 8px;
                align-items: center;
                margin-top: 8px;
            ",
            button {
                class: "study-hover-shadow",
                style: "
                    display: inline-flex;
                    align-items: center;
                    gap: 4px;
                    background: white;
                    border: 1px solid {toggle_color};
                    color: {toggle_color};
                    border-radius: 14px;
                    padding: 4px 10px;
                    cursor: pointer;
                ",
                onclick: move |_| {
                    let next = !highlight_mode();
                    highlight_mode.set(next);
                },
                Icon { icon: MdHighlight, style: "width: 18px; height: 18px;" }
                "{toggle_label}"
            }

            if !records.read().is_empty() {
                button {
                    class: "study-hover-shadow",
                    style: "
                        background: white;
                        border: 1px solid rgba(0,0,0,0.3);
                        border-radius: 14px;
                        padding: 4px 10px;
                        cursor: pointer;
                    ",
                    onclick: clear_question,
                    "Clear highlights"
                }
            }

            for (highlight, drifted) in records.read().iter().cloned() {
                HighlightChip {
                    key: "{highlight.id}",
                    highlight,
                    drifted,
                    on_remove: remove,
                }
            }
        }
    }
}

#[component]
fn HighlightChip(highlight: Highlight, drifted: bool, on_remove: Callback<HighlightId>) -> Element {
    let id = highlight.id;
    // answer text changed since the highlight was made
    let (background, hint) = if drifted {
        ("#e5e7eb", "The answer changed since this was highlighted")
    } else {
        ("#fde68a", "")
    };
    rsx! {
        span {
            title: "{hint}",
            style: "
                display: inline-flex;
                align-items: center;
                gap: 4px;
                background-color: {background};
                border-radius: 12px;
                padding: 2px 4px 2px 10px;
                font-size: 13px;
                max-width: 260px;
            ",
            span {
                style: "overflow: hidden; text-overflow: ellipsis; white-space: nowrap;",
                "{highlight.text}"
            }
            button {
                title: "Remove highlight",
                style: "border: none; background: transparent; cursor: pointer; padding: 0; display: inline-flex;",
                onclick: move |_| on_remove.call(id),
                Icon { icon: MdClear, style: "width: 16px; height: 16px;" }
            }
        }
    }
}
