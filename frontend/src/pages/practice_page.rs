use std::collections::BTreeMap;

use common::question::{Marks, Question, QuestionId};
use common::scoring::{score_test, time_allowed, TestScore};
use dioxus::prelude::*;

use crate::components::practice_components::practice_timer::PracticeTimer;
use crate::components::practice_components::score_report::ScoreReport;
use crate::data_definitions::study_state::use_study_state;
use crate::data_definitions::url_param::UrlParam;
use crate::routes::Route;


/// Timed practice test over the selected mark value.
#[component]
pub fn PracticePage(marks: UrlParam<Option<Marks>>) -> Element {
    rsx! {
        Title { "Study Aid - Practice test" }
        PracticePageRootComponent { marks: marks.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TestPhase {
    Ready,
    Running,
    Finished,
}

#[component]
fn PracticePageRootComponent(marks: ReadSignal<Option<Marks>>) -> Element {
    let bank = use_study_state().bank;
    let questions = use_memo(move || {
        bank.read()
            .with_marks(marks())
            .into_iter()
            .cloned()
            .collect::<Vec<Question>>()
    });
    let mut phase = use_signal(|| TestPhase::Ready);
    let mut answers = use_signal(BTreeMap::<QuestionId, String>::new);
    let mut remaining_secs = use_signal(|| 0_u64);
    let mut score = use_signal(TestScore::default);

    let submit = use_callback(move |_: ()| {
        if *phase.peek() != TestPhase::Running {
            return;
        }
        let qs = questions.read();
        let given = answers.read();
        let result = score_test(
            qs.iter()
                .map(|q| (q, given.get(&q.id).map(String::as_str).unwrap_or(""))),
        );
        dioxus::logger::tracing::info!(
            "Practice test scored {} / {}",
            result.total_awarded,
            result.total_max
        );
        score.set(result);
        phase.set(TestPhase::Finished);
    });

    let start = move |_: Event<MouseData>| {
        answers.set(BTreeMap::new());
        remaining_secs.set(time_allowed(questions.read().iter()).as_secs());
        phase.set(TestPhase::Running);
    };

    let body = match phase() {
        TestPhase::Ready if questions.read().is_empty() => rsx! {
            div {
                style: "font-size: 22px;",
                "No questions to practice. "
                Link { to: Route::HomePage {}, "Import a question bank" }
                " first."
            }
        },
        TestPhase::Ready => {
            let minutes = time_allowed(questions.read().iter()).as_secs() / 60;
            let count = questions.read().len();
            rsx! {
                div {
                    style: "font-size: 20px; line-height: 1.6;",
                    "{count} questions, {minutes} minutes. Answers are graded on the key terms of the model answer."
                }
                PrimaryButton { label: "Start test".to_string(), onclick: start }
            }
        }
        TestPhase::Running => rsx! {
            div {
                style: "display: flex; flex-direction: row; align-items: center; gap: 16px;",
                PracticeTimer { remaining_secs, on_expire: submit }
                PrimaryButton { label: "Submit answers".to_string(), onclick: move |_| submit.call(()) }
            }
            for question in questions.read().iter().cloned() {
                PracticeQuestion { key: "{question.id}", question, answers }
            }
        },
        TestPhase::Finished => rsx! {
            ScoreReport { score: score(), questions: questions() }
            PrimaryButton { label: "Try again".to_string(), onclick: move |_| phase.set(TestPhase::Ready) }
        },
    };

    rsx! {
        div {
            id: "x-practice-page-root-component",
            style: "
                display: flex;
                flex-direction: column;
                gap: 18px;
                padding: 24px 36px;
                background: #F5F6F8;
                min-height: 100%;
                box-sizing: border-box;
            ",
            h1 { style: "margin: 0; font-size: 32px; font-weight: 500; color: #0F172A;", "Practice test" }
            {body}
        }
    }
}

#[component]
fn PracticeQuestion(question: ReadSignal<Question>, mut answers: Signal<BTreeMap<QuestionId, String>>) -> Element {
    let current = use_memo(move || answers.read().get(&question.read().id).cloned().unwrap_or_default());
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 8px;
                padding: 14px 16px;
                border-radius: 12px;
                background: #F8FCFF;
                border: 1px solid rgba(0,0,0,0.12);
            ",
            div {
                style: "display: flex; justify-content: space-between; gap: 12px; font-size: 18px;",
                span { "{question.read().question_text}" }
                span { style: "color: #4F46E5; flex-shrink: 0;", "{question.read().marks}" }
            }
            textarea {
                rows: "4",
                style: "width: 100%; box-sizing: border-box; font-size: 15px; border-radius: 8px; padding: 8px;",
                value: "{current}",
                oninput: move |e| {
                    let id = question.read().id.clone();
                    answers.write().insert(id, e.value());
                },
            }
        }
    }
}

#[component]
fn PrimaryButton(label: String, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
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
            onclick: move |e| onclick.call(e),
            "{label}"
        }
    }
}
