//! Shared library for the study dashboard: question bank, answer
//! highlighting and practice-test scoring.

extern crate serde;


pub mod study_const;
pub mod question;
pub mod highlight;
pub mod scoring;
