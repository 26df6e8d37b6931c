//! Panels the launcher can switch to.

pub mod counter;
pub mod dirtree;
pub mod hello;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::controller::Outcome;
use crate::theme::ThemeColors;

pub use counter::CounterApp;
pub use dirtree::DirectoryTreeApp;
pub use hello::HelloApp;

/// A panel launched from the menu. Returning [`Outcome::Exit`] from
/// `handle_key` hands control back to the launcher.
pub trait MiniApp {
    /// Label shown in the launcher menu.
    fn name(&self) -> &str;

    /// Called each time the panel is launched.
    fn on_enter(&mut self) {}

    fn handle_key(&mut self, key: KeyEvent) -> Outcome;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &ThemeColors);
}
