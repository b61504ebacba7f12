//! Constants shared between the highlight engine and the study frontend.

/// localStorage key holding the whole highlight collection as one JSON document.
pub const HIGHLIGHTS_STORAGE_KEY: &str = "study_aid.highlights";

/// localStorage key holding the imported question bank.
pub const QUESTION_BANK_STORAGE_KEY: &str = "study_aid.question_bank";

/// Label shown ahead of every rendered answer.
pub const ANSWER_LABEL_TEXT: &str = "Answer:";

/// CSS class carried by every highlighted run in rendered markup.
pub const HIGHLIGHT_CSS_CLASS: &str = "study-highlight";

/// Attribute carrying the highlight identifier on a highlighted run.
pub const HIGHLIGHT_ID_ATTRIBUTE: &str = "data-highlight-id";

/// Keyword overlap at or above which an answer earns full marks.
pub const FULL_MARKS_SIMILARITY: f64 = 0.8;

/// Keyword overlap below which an answer earns nothing.
pub const ZERO_MARKS_SIMILARITY: f64 = 0.15;

/// Practice-test time budget per mark.
pub const SECONDS_PER_MARK: u64 = 60;
