pub mod local_storage;
pub mod selection;
pub mod study_state;
pub mod url_param;
