// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod api;
pub mod app;
pub mod chat;
pub mod config;
pub mod format;
pub mod hosting;
pub mod listings;
pub mod protocol;
pub mod tui;
