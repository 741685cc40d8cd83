//! Layout definitions for the TUI
//!
//! Account list on the left; options, register and status bar on the right.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Account picker
    pub accounts: Rect,
    /// Date fields and prior balance toggle
    pub options: Rect,
    /// Processed register
    pub register: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(40)])
            .split(vertical[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(horizontal[1]);

        Self {
            accounts: horizontal[0],
            options: main[0],
            register: main[1],
            status_bar: vertical[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_cover_the_screen() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.accounts.width, 30);
        assert_eq!(layout.options.height, 5);
        assert_eq!(layout.status_bar.y, 39);
        assert_eq!(layout.register.x, 30);
        assert_eq!(layout.register.bottom(), 39);
    }
}
