//! TUI Views module
//!
//! The account picker, the options panel, the register table and the
//! status bar.

pub mod account_list;
pub mod options;
pub mod register;
pub mod status_bar;

use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use super::app::App;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    account_list::render(frame, app, layout.accounts);
    options::render(frame, app, layout.options);
    register::render(frame, app, layout.register);
    status_bar::render(frame, app, layout.status_bar);
}

/// Bordered block, highlighted when its panel has focus
pub(crate) fn panel_block(title: String, focused: bool) -> Block<'static> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}
