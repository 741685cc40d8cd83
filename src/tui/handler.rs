//! Event handler for the TUI
//!
//! Routes key events to the appropriate action based on the current
//! input mode and focused panel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, FocusedPanel, InputMode, OptionField};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => {}
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.next_panel(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),

        KeyCode::Char('p') => app.process(),
        KeyCode::Char('s') => app.save_report(),
        KeyCode::Char('w') => app.save_workbook(),
        KeyCode::Char('o') => app.print(),

        KeyCode::Enter | KeyCode::Char(' ') => activate(app),
        _ => {}
    }
}

/// Enter/space: process from the account list, edit or toggle in the
/// options panel
fn activate(app: &mut App) {
    match app.focused_panel {
        FocusedPanel::Accounts => app.process(),
        FocusedPanel::Options => match app.focused_field {
            OptionField::StartDate | OptionField::EndDate => {
                app.clear_status();
                app.input_mode = InputMode::Editing;
            }
            OptionField::PriorBalance => app.toggle_prior_balance(),
        },
        FocusedPanel::Register => {}
    }
}

/// Handle keys while a date field is being edited
fn handle_editing_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Tab)
        || app.focused_field == OptionField::PriorBalance
    {
        app.input_mode = InputMode::Normal;
        return;
    }
    let Some(input) = app.focused_input() else {
        return;
    };
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}
