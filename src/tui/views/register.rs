//! Processed register table

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::panel_block;
use crate::display::us_date;
use crate::reports::EntryKind;
use crate::tui::app::{App, FocusedPanel};

/// Render the register table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(
        app.register_title(),
        app.focused_panel == FocusedPanel::Register,
    );

    let Some(register) = app.register.as_ref() else {
        let text = Paragraph::new("Pick an account and press 'p' to process it.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    };

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Length(6),  // Num
        Constraint::Min(20),    // Description
        Constraint::Length(14), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Num").style(bold),
        Cell::from("Description").style(bold),
        Cell::from("Amount").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = register
        .entries
        .iter()
        .map(|entry| {
            let amount_style = if entry.amount.is_negative() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            let row = Row::new(vec![
                Cell::from(us_date(entry.date)),
                Cell::from(entry.display_num().to_string()),
                Cell::from(entry.display_description()),
                Cell::from(entry.amount.to_accounting_padded()).style(amount_style),
            ]);
            match entry.kind {
                EntryKind::Transaction => row,
                EntryKind::PriorBalance | EntryKind::CurrentBalance => {
                    row.style(Style::default().add_modifier(Modifier::BOLD))
                }
            }
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_entry_index));
    frame.render_stateful_widget(table, area, &mut state);
}
