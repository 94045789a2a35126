pub mod commands;
pub mod dashboard;
pub mod feed;
pub mod runtime;
