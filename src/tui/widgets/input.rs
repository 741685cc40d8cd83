//! Single-line text field with a cursor

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Editable text, cursor counted in characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    /// Start with `content`, cursor at the end
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.content.remove(at);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index();
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Replace the content, cursor at the end
    pub fn set(&mut self, content: impl Into<String>) {
        *self = Self::new(content);
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    /// Widget drawing this field after `label`
    pub fn widget<'a>(&'a self, label: &'a str, focused: bool, editing: bool) -> InputField<'a> {
        InputField {
            input: self,
            label,
            focused,
            editing,
        }
    }
}

/// Renders a [`TextInput`] as `label: value`
pub struct InputField<'a> {
    input: &'a TextInput,
    label: &'a str,
    focused: bool,
    editing: bool,
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = if self.focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let label = Line::from(vec![
            Span::styled(self.label, label_style),
            Span::raw(": "),
        ]);
        let label_width = (self.label.chars().count() + 2) as u16;
        buf.set_line(area.x, area.y, &label, label_width.min(area.width));

        let input_start = area.x + label_width;
        if input_start >= area.x + area.width {
            return;
        }
        let text_style = if self.editing {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Yellow)
        };
        buf.set_string(input_start, area.y, self.input.value(), text_style);

        if self.editing {
            let cursor_x = input_start + self.input.cursor as u16;
            if cursor_x < area.x + area.width {
                let under = self.input.value().chars().nth(self.input.cursor).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    under.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_in_the_middle() {
        let mut input = TextInput::new("2024-01-05");
        input.move_left();
        input.backspace();
        input.insert('1');
        assert_eq!(input.value(), "2024-01-15");

        input.move_start();
        input.delete();
        input.insert('1');
        assert_eq!(input.value(), "1024-01-15");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut input = TextInput::new("ab");
        input.move_right();
        input.move_right();
        input.delete();
        assert_eq!(input.value(), "ab");

        input.move_start();
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "ab");

        input.set("");
        input.backspace();
        assert_eq!(input.value(), "");
    }
}
