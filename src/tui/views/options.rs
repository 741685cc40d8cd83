//! Date window and prior balance toggle

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel_block;
use crate::tui::app::{App, FocusedPanel, InputMode, OptionField};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_panel == FocusedPanel::Options;
    let block = panel_block(" Options ".to_string(), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let field_focus = |field: OptionField| focused && app.focused_field == field;
    let editing = |field: OptionField| field_focus(field) && app.input_mode == InputMode::Editing;

    frame.render_widget(
        app.start_input.widget(
            "Start date",
            field_focus(OptionField::StartDate),
            editing(OptionField::StartDate),
        ),
        rows[0],
    );
    frame.render_widget(
        app.end_input.widget(
            "End date  ",
            field_focus(OptionField::EndDate),
            editing(OptionField::EndDate),
        ),
        rows[1],
    );

    let mark = if app.include_prior_balance { "[x]" } else { "[ ]" };
    let style = if field_focus(OptionField::PriorBalance) {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let toggle = Line::from(vec![
        Span::styled("Prior balance", style),
        Span::raw(": "),
        Span::styled(mark, Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(toggle), rows[2]);
}
