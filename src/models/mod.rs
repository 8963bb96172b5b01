pub mod action;
pub mod record;
pub mod session_summary;
pub mod task;
