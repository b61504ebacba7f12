pub mod error_boundary;
pub mod navbar;
pub mod practice_components;
pub mod question_components;
