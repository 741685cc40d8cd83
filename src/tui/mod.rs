//! Terminal User Interface module
//!
//! An interactive transaction register: pick an account, set the date
//! window, process it, then save, print or export the result.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
