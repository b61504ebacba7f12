use common::highlight::{AnswerLabel, HighlightMutator};
use common::question::{group_by_marks, Marks, Question};
use dioxus::prelude::*;

use crate::components::question_components::question_card::QuestionCard;
use crate::data_definitions::study_state::use_study_state;
use crate::data_definitions::url_param::UrlParam;
use crate::routes::Route;


/// Study dashboard: questions grouped by mark value.
#[component]
pub fn StudyPage(marks: UrlParam<Option<Marks>>) -> Element {
    let title = match marks.0 {
        Some(m) => format!("Study Aid - {m}"),
        None => "Study Aid - All questions".to_string(),
    };
    rsx! {
        Title { "{title}" }
        StudyPageRootComponent { marks: marks.0 }
    }
}

#[component]
fn StudyPageRootComponent(marks: ReadSignal<Option<Marks>>) -> Element {
    let state = use_study_state();
    let bank = state.bank;
    let mut highlights = state.highlights;

    let visible = use_memo(move || {
        bank.read()
            .with_marks(marks())
            .into_iter()
            .cloned()
            .collect::<Vec<Question>>()
    });
    let sections = use_memo(move || {
        group_by_marks(&visible.read())
            .into_iter()
            .map(|(m, qs)| (m, qs.into_iter().cloned().collect::<Vec<_>>()))
            .collect::<Vec<_>>()
    });

    let clear_all = move |_: Event<MouseData>| {
        let shown = visible.read().clone();
        let mut store = highlights.write();
        let rendered = HighlightMutator::new(&mut *store)
            .with_label(AnswerLabel::default())
            .clear_all(shown.iter());
        dioxus::logger::tracing::info!("Cleared highlights, re-rendered {} questions", rendered.len());
    };

    if bank.read().questions.is_empty() {
        return rsx! {
            div {
                style: "padding: 36px 40px; font-size: 22px;",
                "No questions yet. "
                Link { to: Route::HomePage {}, "Import a question bank" }
                " to start studying."
            }
        };
    }

    rsx! {
        div {
            id: "x-study-page-root-component",
            style: "
                display: flex;
                flex-direction: column;
                gap: 18px;
                padding: 24px 36px;
                background: #F5F6F8;
                min-height: 100%;
                box-sizing: border-box;
            ",
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    gap: 10px;
                    align-items: center;
                    flex-wrap: wrap;
                ",
                MarksFilterChip { label: "All".to_string(), target: None, selected: marks().is_none() }
                for m in Marks::ALL {
                    MarksFilterChip { label: m.to_string(), target: Some(m), selected: marks() == Some(m) }
                }
                div { style: "flex-grow: 1;" }
                Link {
                    to: Route::practice_page(marks()),
                    span { style: "color: #4F46E5; font-size: 16px;", "Take a practice test" }
                }
                button {
                    style: "
                        background: white;
                        border: 1px solid #DC2626;
                        color: #DC2626;
                        border-radius: 14px;
                        padding: 6px 14px;
                        cursor: pointer;
                    ",
                    onclick: clear_all,
                    "Clear all highlights"
                }
            }

            if visible.read().is_empty() {
                div { style: "font-size: 18px; color: rgba(0,0,0,0.6);", "No questions with this mark value." }
            }

            for (section_marks, questions) in sections.read().iter().cloned() {
                div {
                    key: "{section_marks.value()}",
                    style: "display: flex; flex-direction: column; gap: 12px;",
                    h2 {
                        style: "margin: 8px 0 0 0; font-size: 24px; font-weight: 500; color: #0F172A;",
                        "{section_marks} questions"
                    }
                    for question in questions {
                        QuestionCard { key: "{question.id}", question }
                    }
                }
            }
        }
    }
}

#[component]
fn MarksFilterChip(label: String, target: Option<Marks>, selected: bool) -> Element {
    let (background, color) = if selected { ("#4F46E5", "white") } else { ("white", "#111827") };
    rsx! {
        Link {
            to: Route::study_page(target),
            span {
                style: "
                    display: inline-block;
                    background: {background};
                    color: {color};
                    border: 1px solid #4F46E5;
                    border-radius: 14px;
                    padding: 4px 12px;
                    font-size: 15px;
                ",
                "{label}"
            }
        }
    }
}
