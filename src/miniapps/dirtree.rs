use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::MiniApp;
use crate::components::input::{InputState, PathInputWidget};
use crate::components::message::MessageWidget;
use crate::components::tree::TreeWidget;
use crate::controller::{Outcome, Screen, TreeController, TreeEvent, TreeSettings};
use crate::fs::opener::SystemOpener;
use crate::fs::probe::StdProbe;
use crate::theme::ThemeColors;

/// Rows moved by PageUp/PageDown before the tree has been drawn once.
const DEFAULT_PAGE_SIZE: usize = 10;

const INPUT_HINT: &str = "Press ESC to return to menu.";
const TREE_HINT: &str = "Press ESC to return to input field. Press 'o' to open selected folder.";

/// Lazy directory browser: path entry first, then a navigable tree.
pub struct DirectoryTreeApp {
    controller: TreeController,
    input: InputState,
    use_icons: bool,
    /// Visible tree rows at the last render.
    page_size: usize,
}

impl DirectoryTreeApp {
    pub fn new(settings: TreeSettings, use_icons: bool) -> Self {
        let controller = TreeController::new(
            Box::new(StdProbe),
            Box::new(SystemOpener::default()),
            settings,
        );
        Self::with_controller(controller, use_icons)
    }

    pub fn with_controller(controller: TreeController, use_icons: bool) -> Self {
        Self {
            controller,
            input: InputState::default(),
            use_icons,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Esc => return self.controller.dispatch(TreeEvent::Escape),
            KeyCode::Enter => {
                let text = self.input.input.clone();
                return self.controller.dispatch(TreeEvent::Submit(text));
            }
            KeyCode::Char(c) => self.input.insert_char(c),
            KeyCode::Backspace => self.input.delete_char(),
            KeyCode::Delete => self.input.delete_forward(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            _ => {}
        }
        Outcome::Continue
    }

    fn tree_event(&self, key: KeyEvent) -> Option<TreeEvent> {
        let event = match key.code {
            KeyCode::Esc => TreeEvent::Escape,
            KeyCode::Up | KeyCode::Char('k') => TreeEvent::Up,
            KeyCode::Down | KeyCode::Char('j') => TreeEvent::Down,
            KeyCode::Home | KeyCode::Char('g') => TreeEvent::First,
            KeyCode::End | KeyCode::Char('G') => TreeEvent::Last,
            KeyCode::PageUp => TreeEvent::PageUp(self.page_size),
            KeyCode::PageDown => TreeEvent::PageDown(self.page_size),
            KeyCode::Enter | KeyCode::Char(' ') => TreeEvent::Toggle,
            KeyCode::Right | KeyCode::Char('l') => TreeEvent::Expand,
            KeyCode::Left | KeyCode::Char('h') => TreeEvent::CollapseOrParent,
            KeyCode::Char('o') => TreeEvent::Open,
            _ => return None,
        };
        Some(event)
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, theme: &ThemeColors) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            PathInputWidget::new("Directory Tree App", "Enter directory path: ", &self.input, theme),
            chunks[0],
        );
        frame.render_widget(
            MessageWidget::new("Message", self.controller.message(), theme),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(INPUT_HINT).style(Style::default().fg(theme.dim_fg)),
            chunks[3],
        );
    }

    fn render_tree(&mut self, frame: &mut Frame, area: Rect, theme: &ThemeColors) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let use_icons = self.use_icons;
        // Borders take two rows.
        let visible_rows = chunks[0].height.saturating_sub(2) as usize;
        self.page_size = visible_rows.max(1);
        if let Some(state) = self.controller.tree_mut() {
            state.update_scroll(visible_rows);
        }
        if let Some(state) = self.controller.tree() {
            let block = Block::default()
                .title(format!(" Tree: {} ", state.root.path.display()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused_fg));
            frame.render_widget(TreeWidget::new(state, theme, use_icons).block(block), chunks[0]);
        }
        frame.render_widget(
            MessageWidget::new("Action Message", self.controller.message(), theme),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(TREE_HINT).style(Style::default().fg(theme.dim_fg)),
            chunks[2],
        );
    }
}

impl MiniApp for DirectoryTreeApp {
    fn name(&self) -> &str {
        "Directory Tree"
    }

    fn on_enter(&mut self) {
        self.controller.reset();
        self.input.clear();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.controller.is_viewing_tree() {
            return self.handle_input_key(key);
        }
        match self.tree_event(key) {
            Some(event) => self.controller.dispatch(event),
            None => Outcome::Continue,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &ThemeColors) {
        match self.controller.screen() {
            Screen::ViewingTree(_) => self.render_tree(frame, area, theme),
            Screen::EnteringPath => self.render_input(frame, area, theme),
        }
    }
}
