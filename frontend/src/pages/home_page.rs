use common::question::{group_by_marks, QuestionBank};
use dioxus::prelude::*;
use dioxus_free_icons::icons::md_social_icons::MdSchool;
use dioxus_free_icons::Icon;

use crate::data_definitions::local_storage::save_question_bank;
use crate::data_definitions::study_state::use_study_state;
use crate::routes::Route;


/// Import page: paste the generated question bank JSON.
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Study Aid - Import" }
        div {
            id: "x-home-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 20px;
                width: 100%;
                height: 100%;
                padding: 36px 40px;
                background: #F5F6F8;
                box-sizing: border-box;
                overflow: auto;
            ",

            MainTitle {}
            BankSummary {}
            ImportCard {}
        }
    }
}


#[component]
fn MainTitle() -> Element {
    rsx! {
        div {
            style: "
                display:flex;
                align-items: center;
                gap: 8px;
                color: #0F172A;
                font-size: 46px;
                font-weight: 500;
                letter-spacing: -0.02em;
            ",
            Icon { icon: MdSchool, style: "width: 46px; height: 46px; color:#4F46E5;" }
            span { "Study" }
            span { style: "color:#4F46E5;", "Aid" }
        }
    }
}

#[component]
fn BankSummary() -> Element {
    let bank = use_study_state().bank;
    let sections = use_memo(move || {
        group_by_marks(&bank.read().questions)
            .into_iter()
            .map(|(marks, questions)| (marks, questions.len()))
            .collect::<Vec<_>>()
    });

    if sections.read().is_empty() {
        return rsx! {
            div {
                style: "font-size: 20px; color: #111827; max-width: 620px; line-height: 1.6;",
                "No questions imported yet. Paste the question bank generated from your PDF below."
            }
        };
    }

    rsx! {
        div {
            style: "display:flex; flex-direction: row; gap: 14px; flex-wrap: wrap;",
            for (marks, count) in sections.read().iter().copied() {
                Link {
                    to: Route::study_page(Some(marks)),
                    div {
                        class: "study-hover-shadow",
                        style: "
                            display:flex;
                            flex-direction: column;
                            gap: 6px;
                            min-width: 150px;
                            padding: 16px 20px;
                            border-radius: 18px;
                            background: linear-gradient(135deg, #2D208A 0%, #5B3DF5 100%);
                            color: white;
                        ",
                        span { style: "font-size: 30px; font-weight: 500;", "{count}" }
                        span { style: "font-size: 16px;", "{marks} questions" }
                    }
                }
            }
        }
    }
}

#[component]
fn ImportCard() -> Element {
    let mut bank = use_study_state().bank;
    let mut raw_json = use_signal(String::new);
    let mut import_error = use_signal(|| None::<String>);
    let navigator = navigator();

    let do_import = move |_: Event<MouseData>| {
        let parsed = match QuestionBank::from_json(&raw_json.read()) {
            Ok(parsed) => parsed,
            Err(e) => {
                import_error.set(Some(e.to_string()));
                return;
            }
        };
        if let Err(e) = save_question_bank(&parsed) {
            dioxus::logger::tracing::warn!("Question bank kept for this session only: {e:#}");
        }
        dioxus::logger::tracing::info!("Imported {} questions", parsed.questions.len());
        import_error.set(None);
        bank.set(parsed);
        navigator.push(Route::study_page(None));
    };

    rsx! {
        div {
            id: "x-card-import",
            style: "
                display:flex;
                flex-direction: column;
                gap: 14px;
                max-width: 820px;
                border-radius: 22px;
                padding: 22px;
                background: white;
                box-shadow: 0 8px 24px rgba(0,0,0,0.12);
            ",
            div { style: "font-size: 26px; font-weight: 500;", "Import questions" }
            div {
                style: "font-size: 15px; color: rgba(0,0,0,0.7);",
                "Expected format: [{{\"id\": 1, \"question\": \"...\", \"answer\": \"...\", \"marks\": 2}}, ...] with marks 1, 2, 3 or 10."
            }
            textarea {
                rows: "12",
                style: "
                    width: 100%;
                    box-sizing: border-box;
                    font-family: monospace;
                    font-size: 13px;
                    border: 1px solid rgba(0,0,0,0.3);
                    border-radius: 10px;
                    padding: 10px;
                ",
                value: "{raw_json}",
                oninput: move |e| raw_json.set(e.value()),
            }
            if let Some(error) = import_error() {
                div { style: "color: #DC2626; font-size: 15px;", "{error}" }
            }
            button {
                style: "
                    align-self: flex-start;
                    background: #4F46E5;
                    color: white;
                    border: none;
                    border-radius: 9999px;
                    padding: 10px 22px;
                    font-size: 16px;
                    cursor: pointer;
                ",
                onclick: do_import,
                "Import and study"
            }
        }
    }
}
