use ratatui::Frame;

use crate::app::App;
use crate::components::menu::{MenuEntry, MenuWidget};

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    if let Some(idx) = app.active {
        let theme = app.theme.clone();
        if let Some(panel) = app.apps.get_mut(idx) {
            panel.render(frame, area, &theme);
        }
        return;
    }

    let mut entries: Vec<MenuEntry> = app
        .apps
        .iter()
        .enumerate()
        .map(|(i, panel)| MenuEntry {
            shortcut: char::from_digit((i + 1) as u32, 10).unwrap_or(' '),
            label: panel.name(),
            description: "",
        })
        .collect();
    entries.push(MenuEntry {
        shortcut: 'q',
        label: "Quit",
        description: "Exit program",
    });

    frame.render_widget(MenuWidget::new(entries, app.menu_index, &app.theme), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::theme::dark_theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn menu_lists_panels_and_quit() {
        let mut app = App::new(&AppConfig::default(), dark_theme());
        let text = draw(&mut app);
        assert!(text.contains("Mini App Launcher"));
        assert!(text.contains("(1) Hello App"));
        assert!(text.contains("(3) Directory Tree"));
        assert!(text.contains("(q) Quit"));
    }

    #[test]
    fn active_panel_replaces_menu() {
        let mut app = App::new(&AppConfig::default(), dark_theme());
        app.activate(0);
        let text = draw(&mut app);
        assert!(text.contains("Welcome to Hello App!"));
        assert!(!text.contains("Mini App Launcher"));
    }
}
