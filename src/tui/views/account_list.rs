//! Account picker

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::panel_block;
use crate::tui::app::{App, FocusedPanel};

/// Render the account list
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(
        " Accounts ".to_string(),
        app.focused_panel == FocusedPanel::Accounts,
    );

    if app.accounts.is_empty() {
        let text = Paragraph::new("No accounts with transactions.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .accounts
        .iter()
        .map(|name| ListItem::new(name.as_str()))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_account_index));
    frame.render_stateful_widget(list, area, &mut state);
}
