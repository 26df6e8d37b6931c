use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::theme::ThemeColors;

/// Single-line text input with a byte-offset cursor kept on char boundaries.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub input: String,
    pub cursor_position: usize,
}

impl InputState {
    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.input.remove(self.cursor_position);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor_position < self.input.len() {
            self.input.remove(self.cursor_position);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn end(&mut self) {
        self.cursor_position = self.input.len();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }
}

/// Bordered path entry box: a label followed by the input and a block cursor.
pub struct PathInputWidget<'a> {
    title: &'a str,
    label: &'a str,
    state: &'a InputState,
    theme: &'a ThemeColors,
}

impl<'a> PathInputWidget<'a> {
    pub fn new(title: &'a str, label: &'a str, state: &'a InputState, theme: &'a ThemeColors) -> Self {
        Self {
            title,
            label,
            state,
            theme,
        }
    }
}

impl<'a> Widget for PathInputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused_fg));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let input = &self.state.input;
        let cursor = self.state.cursor_position;
        let before = &input[..cursor];
        let (cursor_char, after) = match input[cursor..].chars().next() {
            Some(c) => (&input[cursor..cursor + c.len_utf8()], &input[cursor + c.len_utf8()..]),
            None => (" ", ""),
        };

        // Keep the cursor in view by dropping characters from the left.
        let budget = (inner.width as usize).saturating_sub(self.label.chars().count() + 1);
        let before_len = before.chars().count();
        let before_display: String = if before_len > budget {
            before.chars().skip(before_len - budget).collect()
        } else {
            before.to_string()
        };

        let input_style = Style::default().fg(self.theme.text_fg);
        let cursor_style = Style::default()
            .bg(self.theme.text_fg)
            .fg(self.theme.tree_selected_bg)
            .add_modifier(Modifier::BOLD);

        let line = Line::from(vec![
            Span::styled(self.label, Style::default().fg(self.theme.accent_fg)),
            Span::styled(before_display, input_style),
            Span::styled(cursor_char, cursor_style),
            Span::styled(after, input_style),
        ]);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
