pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod run;
