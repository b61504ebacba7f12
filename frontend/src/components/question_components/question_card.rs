//! One question with its highlightable answer.

use common::question::Question;
use dioxus::prelude::*;

use super::highlight_toolbar::HighlightToolbar;
use super::highlighted_answer::HighlightedAnswer;
use crate::components::error_boundary::QuestionErrorBoundary;

#[component]
pub fn QuestionCard(question: ReadSignal<Question>) -> Element {
    let highlight_mode = use_signal(|| false);
    let marks_label = use_memo(move || question.read().marks.to_string());
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 8px;
                padding: 16px 18px;
                border-radius: 14px;
                background: #F8FCFF;
                border: 1px solid rgba(0,0,0,0.12);
                box-shadow: 0 2px 6px rgba(0,0,0,0.06);
            ",
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    justify-content: space-between;
                    align-items: baseline;
                    gap: 12px;
                ",
                div {
                    style: "font-size: 19px; font-weight: 500; color: #0F172A;",
                    "{question.read().question_text}"
                }
                span {
                    style: "
                        flex-shrink: 0;
                        font-size: 13px;
                        color: #4F46E5;
                        border: 1px solid #4F46E5;
                        border-radius: 10px;
                        padding: 1px 8px;
                    ",
                    "{marks_label}"
                }
            }
            QuestionErrorBoundary {
                HighlightedAnswer { question, highlight_mode }
                HighlightToolbar { question, highlight_mode }
            }
        }
    }
}
