pub mod config;
pub mod dispatch;
pub mod panel;
pub mod presentation;
pub mod status;
