use crate::config::AppConfig;
use crate::miniapps::{CounterApp, DirectoryTreeApp, HelloApp, MiniApp};
use crate::theme::ThemeColors;

/// Main application state: the launcher menu and whichever panel is active.
pub struct App {
    pub apps: Vec<Box<dyn MiniApp>>,
    /// Cursor over the menu rows; `apps.len()` is the Quit row.
    pub menu_index: usize,
    /// Index into `apps` of the running panel, `None` while the menu shows.
    pub active: Option<usize>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    /// Create the launcher with the built-in panels.
    pub fn new(config: &AppConfig, theme: ThemeColors) -> Self {
        let apps: Vec<Box<dyn MiniApp>> = vec![
            Box::new(HelloApp),
            Box::new(CounterApp::default()),
            Box::new(DirectoryTreeApp::new(config.tree_settings(), config.use_icons())),
        ];
        Self::with_apps(apps, theme)
    }

    pub fn with_apps(apps: Vec<Box<dyn MiniApp>>, theme: ThemeColors) -> Self {
        Self {
            apps,
            menu_index: 0,
            active: None,
            should_quit: false,
            theme,
        }
    }

    /// Number of menu rows, including Quit.
    pub fn menu_len(&self) -> usize {
        self.apps.len() + 1
    }

    pub fn select_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % self.menu_len();
    }

    pub fn select_previous(&mut self) {
        self.menu_index = if self.menu_index == 0 {
            self.menu_len() - 1
        } else {
            self.menu_index - 1
        };
    }

    /// Launch the panel at `index`; the Quit row quits.
    pub fn activate(&mut self, index: usize) {
        if index == self.apps.len() {
            self.quit();
            return;
        }
        if let Some(app) = self.apps.get_mut(index) {
            tracing::info!(panel = app.name(), "launching panel");
            app.on_enter();
            self.menu_index = index;
            self.active = Some(index);
        }
    }

    /// Leave the active panel and show the menu again.
    pub fn return_to_menu(&mut self) {
        if let Some(idx) = self.active.take() {
            tracing::debug!(panel = self.apps[idx].name(), "panel exited");
        }
    }

    pub fn active_app_mut(&mut self) -> Option<&mut Box<dyn MiniApp>> {
        let idx = self.active?;
        self.apps.get_mut(idx)
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    fn app() -> App {
        App::new(&AppConfig::default(), dark_theme())
    }

    #[test]
    fn menu_includes_quit_row() {
        let app = app();
        assert_eq!(app.apps.len(), 3);
        assert_eq!(app.menu_len(), 4);
        let names: Vec<&str> = app.apps.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Hello App", "Counter App", "Directory Tree"]);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut app = app();
        app.select_previous();
        assert_eq!(app.menu_index, 3);
        app.select_next();
        assert_eq!(app.menu_index, 0);
    }

    #[test]
    fn activate_and_return() {
        let mut app = app();
        app.activate(2);
        assert_eq!(app.active, Some(2));
        assert_eq!(app.active_app_mut().unwrap().name(), "Directory Tree");
        app.return_to_menu();
        assert!(app.active.is_none());
        assert_eq!(app.menu_index, 2);
    }

    #[test]
    fn activating_quit_row_quits() {
        let mut app = app();
        app.activate(3);
        assert!(app.should_quit);
        assert!(app.active.is_none());
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut app = app();
        app.activate(9);
        assert!(app.active.is_none());
        assert!(!app.should_quit);
    }
}
