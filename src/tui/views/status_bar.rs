//! Status bar view
//!
//! Shows the last action's outcome and the keys that apply right now

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode};

/// Key hints for the current state
pub fn hints(app: &App) -> String {
    if app.input_mode == InputMode::Editing {
        return " Enter/Esc:Done ".to_string();
    }
    let mut hints = String::from(" q:Quit  Tab:Panel  p:Process");
    if app.register.is_some() {
        hints.push_str("  s:Save  w:Workbook");
    }
    if app.saved_report.is_some() {
        hints.push_str("  o:Print");
    }
    hints.push(' ');
    hints
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    if let Some(ref message) = app.status_message {
        let color = if message.starts_with("Error") {
            Color::Red
        } else {
            Color::Yellow
        };
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(color),
        ));
    }

    let hints = hints(app);
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
