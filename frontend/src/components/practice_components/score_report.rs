//! Result table for a graded practice test.

use common::question::Question;
use common::scoring::TestScore;
use dioxus::prelude::*;

#[component]
pub fn ScoreReport(score: ReadSignal<TestScore>, questions: ReadSignal<Vec<Question>>) -> Element {
    let summary = use_memo(move || {
        let s = score.read();
        format!("{} / {} marks ({:.0}%)", s.total_awarded, s.total_max, s.percentage())
    });
    let rows = use_memo(move || {
        let questions = questions.read();
        score
            .read()
            .answers
            .iter()
            .map(|a| {
                let text = questions
                    .iter()
                    .find(|q| q.id == a.question_id)
                    .map(|q| q.question_text.clone())
                    .unwrap_or_else(|| a.question_id.to_string());
                let marks = format!("{} / {}", a.awarded_marks, a.max_marks);
                (text, marks, a.missing.join(", "))
            })
            .collect::<Vec<_>>()
    });

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px;",
            div {
                style: "font-size: 28px; font-weight: 500; color: #0F172A;",
                "Score: {summary}"
            }
            for (text, marks, missing) in rows.read().iter().cloned() {
                div {
                    style: "
                        padding: 12px 14px;
                        border-radius: 10px;
                        background: #F8FCFF;
                        border: 1px solid rgba(0,0,0,0.12);
                    ",
                    div {
                        style: "display: flex; justify-content: space-between; gap: 12px;",
                        span { style: "font-weight: 500;", "{text}" }
                        span { "{marks}" }
                    }
                    if !missing.is_empty() {
                        div {
                            style: "font-size: 14px; color: rgba(0,0,0,0.6); margin-top: 4px;",
                            "Missing key terms: {missing}"
                        }
                    }
                }
            }
        }
    }
}
