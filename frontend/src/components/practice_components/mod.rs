pub mod practice_timer;
pub mod score_report;
