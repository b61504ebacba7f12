//! Practice-test grading.
//!
//! Answers are compared to the model answer as bags of keywords: the
//! share of model keywords the student used decides the marks awarded.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::question::{Question, QuestionId};
use crate::study_const::{FULL_MARKS_SIMILARITY, SECONDS_PER_MARK, ZERO_MARKS_SIMILARITY};

static STOPWORDS: &[&str] = &[
    "the", "and", "are", "was", "were", "for", "with", "that", "this", "these", "those", "from",
    "into", "onto", "its", "it's", "their", "there", "they", "them", "than", "then", "which",
    "who", "whom", "what", "when", "where", "why", "how", "has", "have", "had", "been", "being",
    "but", "not", "can", "could", "will", "would", "should", "may", "might", "also", "such",
    "any", "all", "each", "other", "some", "more", "most", "very", "our", "your", "his", "her",
    "she", "him", "you", "use", "used", "using", "called", "known", "via", "per", "upon",
];

/// Lowercased, de-duplicated content words of `text`.
pub fn keywords(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() >= 3 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerScore {
    pub question_id: QuestionId,
    /// Share of model-answer keywords present in the student answer, `0.0..=1.0`.
    pub similarity: f64,
    pub awarded_marks: f64,
    pub max_marks: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

pub fn score_answer(question: &Question, user_answer: &str) -> AnswerScore {
    let expected = keywords(&question.answer_text);
    let given = keywords(user_answer);
    let matched: Vec<String> = expected.intersection(&given).cloned().collect();
    let missing: Vec<String> = expected.difference(&given).cloned().collect();

    let similarity = if expected.is_empty() || given.is_empty() {
        0.0
    } else {
        matched.len() as f64 / expected.len() as f64
    };
    let max_marks = question.marks.value();
    let awarded_marks = marks_for(similarity, max_marks);

    AnswerScore {
        question_id: question.id.clone(),
        similarity,
        awarded_marks,
        max_marks,
        matched,
        missing,
    }
}

fn marks_for(similarity: f64, max_marks: u8) -> f64 {
    let max = f64::from(max_marks);
    if similarity >= FULL_MARKS_SIMILARITY {
        max
    } else if similarity < ZERO_MARKS_SIMILARITY {
        0.0
    } else {
        ((similarity * max * 2.0).round() / 2.0).min(max)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestScore {
    pub answers: Vec<AnswerScore>,
    pub total_awarded: f64,
    pub total_max: u32,
}

impl TestScore {
    pub fn percentage(&self) -> f64 {
        if self.total_max == 0 {
            return 0.0;
        }
        self.total_awarded / f64::from(self.total_max) * 100.0
    }
}

/// Grade a whole practice test. Unanswered questions score zero.
pub fn score_test<'a>(answers: impl IntoIterator<Item = (&'a Question, &'a str)>) -> TestScore {
    let answers: Vec<AnswerScore> = answers
        .into_iter()
        .map(|(question, answer)| score_answer(question, answer))
        .collect();
    let total_awarded = answers.iter().map(|a| a.awarded_marks).sum();
    let total_max = answers.iter().map(|a| u32::from(a.max_marks)).sum();
    TestScore { answers, total_awarded, total_max }
}

/// Time budget for a practice test: one minute per mark.
pub fn time_allowed<'a>(questions: impl IntoIterator<Item = &'a Question>) -> Duration {
    let marks: u64 = questions.into_iter().map(|q| u64::from(q.marks.value())).sum();
    Duration::from_secs(marks * SECONDS_PER_MARK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Marks;

    fn question(answer: &str, marks: Marks) -> Question {
        Question {
            id: QuestionId::from("q1"),
            question_text: "What is osmosis?".to_string(),
            answer_text: answer.to_string(),
            marks,
        }
    }

    #[test]
    fn test_keywords_drop_stopwords_and_short_words() {
        let words = keywords("Osmosis is the movement of WATER molecules, water!");
        assert_eq!(
            words.into_iter().collect::<Vec<_>>(),
            vec!["molecules", "movement", "osmosis", "water"]
        );
    }

    #[test]
    fn test_full_marks_for_close_answer() {
        let q = question("Osmosis is the movement of water molecules.", Marks::Two);
        let score = score_answer(&q, "osmosis: movement of water molecules across a membrane");
        assert_eq!(score.similarity, 1.0);
        assert_eq!(score.awarded_marks, 2.0);
        assert!(score.missing.is_empty());
    }

    #[test]
    fn test_partial_marks_rounded_to_half() {
        let q = question("Osmosis is the movement of water molecules.", Marks::Ten);
        // 2 of 4 keywords
        let score = score_answer(&q, "water movement");
        assert_eq!(score.similarity, 0.5);
        assert_eq!(score.awarded_marks, 5.0);
        assert_eq!(score.missing, vec!["molecules".to_string(), "osmosis".to_string()]);

        let q = question("Osmosis is the movement of water molecules.", Marks::Three);
        // 1 of 4 keywords: 0.25 * 3 = 0.75 -> 1.0
        let score = score_answer(&q, "water");
        assert_eq!(score.awarded_marks, 1.0);
    }

    #[test]
    fn test_zero_for_empty_or_unrelated_answer() {
        let q = question("Osmosis is the movement of water molecules.", Marks::Three);
        assert_eq!(score_answer(&q, "").awarded_marks, 0.0);
        assert_eq!(score_answer(&q, "photosynthesis happens in leaves").awarded_marks, 0.0);
    }

    #[test]
    fn test_score_test_totals() {
        let q1 = question("Osmosis is the movement of water molecules.", Marks::Two);
        let q2 = question("Mitochondria produce energy.", Marks::One);
        let score = score_test([(&q1, "movement of water molecules in osmosis"), (&q2, "")]);
        assert_eq!(score.total_max, 3);
        assert_eq!(score.total_awarded, 2.0);
        assert!((score.percentage() - 66.666).abs() < 0.01);
        assert_eq!(TestScore::default().percentage(), 0.0);
    }

    #[test]
    fn test_time_allowed_is_per_mark() {
        let q1 = question("a", Marks::Ten);
        let q2 = question("b", Marks::Two);
        assert_eq!(time_allowed([&q1, &q2]), Duration::from_secs(720));
    }
}
