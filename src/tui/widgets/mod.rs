// TUI widget modules for each panel.

pub mod chat;
pub mod help_bar;
pub mod host_form;
pub mod input_bar;
pub mod listings;
pub mod status_bar;
