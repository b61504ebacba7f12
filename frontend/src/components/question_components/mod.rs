pub mod highlight_toolbar;
pub mod highlighted_answer;
pub mod question_card;
