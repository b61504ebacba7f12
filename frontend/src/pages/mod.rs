pub mod home_page;
pub mod practice_page;
pub mod study_page;
