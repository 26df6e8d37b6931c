use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::MiniApp;
use crate::controller::Outcome;
use crate::theme::ThemeColors;

/// Static greeting panel.
#[derive(Debug, Default)]
pub struct HelloApp;

impl MiniApp for HelloApp {
    fn name(&self) -> &str {
        "Hello App"
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Esc => Outcome::Exit,
            _ => Outcome::Continue,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &ThemeColors) {
        let block = Block::default()
            .title(" Hello App ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused_fg));
        let text = Paragraph::new("Welcome to Hello App!\n\nPress ESC to return to menu.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_fg))
            .block(block);
        frame.render_widget(text, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn escape_exits() {
        let mut app = HelloApp;
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let other = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.handle_key(other), Outcome::Continue);
        assert_eq!(app.handle_key(esc), Outcome::Exit);
    }

    #[test]
    fn renders_greeting() {
        let mut app = HelloApp;
        let theme = dark_theme();
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|frame| app.render(frame, frame.area(), &theme))
            .unwrap();
        let buf = terminal.backend().buffer();
        let row: String = (0..40)
            .map(|x| buf.cell((x, 1)).unwrap().symbol().to_string())
            .collect();
        assert!(row.contains("Welcome to Hello App!"));
    }
}
