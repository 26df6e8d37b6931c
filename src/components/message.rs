use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::controller::StatusMessage;
use crate::theme::ThemeColors;

/// Bordered box showing the latest status message, colored by outcome.
pub struct MessageWidget<'a> {
    title: &'a str,
    message: Option<&'a StatusMessage>,
    theme: &'a ThemeColors,
}

impl<'a> MessageWidget<'a> {
    pub fn new(title: &'a str, message: Option<&'a StatusMessage>, theme: &'a ThemeColors) -> Self {
        Self {
            title,
            message,
            theme,
        }
    }
}

impl<'a> Widget for MessageWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_fg));

        let (text, style) = match self.message {
            Some(msg) if msg.is_error => (msg.text.as_str(), Style::default().fg(self.theme.error_fg)),
            Some(msg) => (msg.text.as_str(), Style::default().fg(self.theme.success_fg)),
            None => ("", Style::default()),
        };

        Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    fn content(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn error_message_uses_error_color() {
        let theme = dark_theme();
        let msg = StatusMessage::error("Path cannot be empty.");
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        MessageWidget::new("Message", Some(&msg), &theme).render(area, &mut buf);

        assert!(content(&buf, 0, 40).contains("Message"));
        assert!(content(&buf, 1, 40).contains("Path cannot be empty."));
        assert_eq!(buf.cell((1, 1)).unwrap().fg, theme.error_fg);
    }

    #[test]
    fn info_message_uses_success_color() {
        let theme = dark_theme();
        let msg = StatusMessage::info("Opened folder: /tmp");
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        MessageWidget::new("Action Message", Some(&msg), &theme).render(area, &mut buf);

        assert!(content(&buf, 1, 40).contains("Opened folder: /tmp"));
        assert_eq!(buf.cell((1, 1)).unwrap().fg, theme.success_fg);
    }

    #[test]
    fn empty_message_renders_only_border() {
        let theme = dark_theme();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        MessageWidget::new("Message", None, &theme).render(area, &mut buf);
        assert_eq!(content(&buf, 1, 20).trim_matches(|c: char| c == '│' || c == ' '), "");
    }

    #[test]
    fn zero_area_does_not_panic() {
        let theme = dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        MessageWidget::new("Message", None, &theme).render(area, &mut buf);
    }
}
