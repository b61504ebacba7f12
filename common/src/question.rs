//! Question bank models shared by the study dashboard and practice test.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::highlight::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        QuestionId(value.to_string())
    }
}

impl Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mark value of an exam-style question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marks {
    One,
    Two,
    Three,
    Ten,
}

impl Marks {
    pub const ALL: [Marks; 4] = [Marks::One, Marks::Two, Marks::Three, Marks::Ten];

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Marks::One),
            2 => Some(Marks::Two),
            3 => Some(Marks::Three),
            10 => Some(Marks::Ten),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        match self {
            Marks::One => 1,
            Marks::Two => 2,
            Marks::Three => 3,
            Marks::Ten => 10,
        }
    }
}

impl Display for Marks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marks::One => write!(f, "1 mark"),
            other => write!(f, "{} marks", other.value()),
        }
    }
}

impl Serialize for Marks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for Marks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Marks::from_value(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported mark value {value}, expected 1, 2, 3 or 10")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(alias = "question")]
    pub question_text: String,
    #[serde(alias = "answer")]
    pub answer_text: String,
    pub marks: Marks,
}

impl Question {
    /// The normalized answer all highlight offsets are computed against.
    pub fn canonical_answer(&self) -> String {
        normalize(&self.answer_text)
    }
}

#[derive(Debug, Error)]
pub enum QuestionBankError {
    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question bank contains duplicate id \"{0}\"")]
    DuplicateId(QuestionId),

    #[error("question \"{0}\" has an empty answer")]
    EmptyAnswer(QuestionId),
}

/// Shape emitted by the question generator; ids may be numbers or strings.
#[derive(Deserialize)]
struct RawQuestion {
    id: RawId,
    #[serde(alias = "question_text")]
    question: String,
    #[serde(alias = "answer_text")]
    answer: String,
    marks: Marks,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

/// An imported, validated set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn from_json(raw: &str) -> Result<Self, QuestionBankError> {
        let raw_questions: Vec<RawQuestion> = serde_json::from_str(raw)?;
        let mut seen = std::collections::BTreeSet::new();
        let mut questions = Vec::with_capacity(raw_questions.len());
        for q in raw_questions {
            let id = match q.id {
                RawId::Number(n) => QuestionId(n.to_string()),
                RawId::Text(s) => QuestionId(s),
            };
            if !seen.insert(id.clone()) {
                return Err(QuestionBankError::DuplicateId(id));
            }
            if q.answer.trim().is_empty() {
                return Err(QuestionBankError::EmptyAnswer(id));
            }
            questions.push(Question { id, question_text: q.question, answer_text: q.answer, marks: q.marks });
        }
        Ok(Self { questions })
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    pub fn with_marks(&self, marks: Option<Marks>) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| marks.is_none_or(|m| q.marks == m))
            .collect()
    }
}

/// Group questions into dashboard sections, ordered 1, 2, 3, 10 marks.
pub fn group_by_marks(questions: &[Question]) -> BTreeMap<Marks, Vec<&Question>> {
    let mut groups: BTreeMap<Marks, Vec<&Question>> = BTreeMap::new();
    for q in questions {
        groups.entry(q.marks).or_default().push(q);
    }
    groups
}
