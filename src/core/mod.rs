pub mod cancel;
pub mod config;
pub mod notify;
pub mod observer;
pub mod session;
pub mod summary;
pub mod tracking;
