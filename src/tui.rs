use std::io::{self, Stdout};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::app::App;
use crate::error::{AppError, Result};
use crate::ui;

/// Terminal owned by the launcher. While `raw` is set the real terminal is in
/// raw mode on the alternate screen and must be handed back on exit.
pub struct Tui<B: Backend> {
    terminal: Terminal<B>,
    raw: bool,
}

impl Tui<CrosstermBackend<Stdout>> {
    /// Take over stdout: raw mode, alternate screen, hidden cursor.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| AppError::Terminal(format!("cannot enable raw mode: {}", e)))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        tracing::debug!("terminal switched to raw mode");
        Ok(Self {
            terminal,
            raw: true,
        })
    }

    /// Hand the terminal back. Safe to call more than once.
    pub fn restore(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
        tracing::debug!("terminal restored");
        Ok(())
    }
}

impl<B: Backend> Tui<B> {
    /// Wrap a backend without touching terminal modes.
    #[cfg(test)]
    pub fn headless(backend: B) -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            raw: false,
        })
    }

    /// Draw one frame of the launcher or the active panel.
    pub fn draw(&mut self, app: &mut App) -> Result<()> {
        self.terminal.draw(|frame| ui::render(app, frame))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Drop for Tui<B> {
    fn drop(&mut self) {
        if self.raw {
            let _ = terminal::disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        }
    }
}

/// Install a panic hook that restores the terminal before printing panic info.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        tracing::error!("panic: {}", panic_info);
        original_hook(panic_info);
    }));
}
