use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::MiniApp;
use crate::controller::Outcome;
use crate::theme::ThemeColors;

/// A single counter, kept across launches. It is redrawn on every tick of the
/// event loop and only ever touched from the UI thread.
#[derive(Debug, Default)]
pub struct CounterApp {
    count: u64,
}

impl CounterApp {
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl MiniApp for CounterApp {
    fn name(&self) -> &str {
        "Counter App"
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Char('+') => {
                self.count = self.count.saturating_add(1);
                Outcome::Continue
            }
            KeyCode::Esc => Outcome::Exit,
            _ => Outcome::Continue,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &ThemeColors) {
        let text_style = Style::default().fg(theme.text_fg);
        let lines = vec![
            Line::from(Span::styled(
                "Counter App",
                Style::default()
                    .fg(theme.success_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(format!("Count: {}", self.count), text_style)),
            Line::from(""),
            Line::from(Span::styled(
                "Press + to increment, ESC to return.",
                text_style,
            )),
        ];
        let block = Block::default()
            .title(" Counter App ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused_fg));
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn plus_increments() {
        let mut app = CounterApp::default();
        app.handle_key(key(KeyCode::Char('+')));
        app.handle_key(key(KeyCode::Char('+')));
        app.handle_key(key(KeyCode::Char('-')));
        assert_eq!(app.count(), 2);
    }

    #[test]
    fn count_survives_relaunch() {
        let mut app = CounterApp::default();
        app.handle_key(key(KeyCode::Char('+')));
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Outcome::Exit);
        app.on_enter();
        assert_eq!(app.count(), 1);
    }
}
