use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::theme::ThemeColors;

/// One launcher entry: shortcut key, label and optional description.
pub struct MenuEntry<'a> {
    pub shortcut: char,
    pub label: &'a str,
    pub description: &'a str,
}

/// The launcher's list of mini-apps.
pub struct MenuWidget<'a> {
    entries: Vec<MenuEntry<'a>>,
    selected: usize,
    theme: &'a ThemeColors,
}

impl<'a> MenuWidget<'a> {
    pub fn new(entries: Vec<MenuEntry<'a>>, selected: usize, theme: &'a ThemeColors) -> Self {
        Self {
            entries,
            selected,
            theme,
        }
    }
}

impl<'a> Widget for MenuWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Mini App Launcher ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused_fg));
        let inner = block.inner(area);
        block.render(area, buf);

        // Each entry takes a label row, plus a description row when present.
        let mut y = inner.y;
        for (idx, entry) in self.entries.iter().enumerate() {
            if y >= inner.y + inner.height {
                break;
            }
            let label_style = if idx == self.selected {
                Style::default()
                    .bg(self.theme.tree_selected_bg)
                    .fg(self.theme.tree_selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text_fg)
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("({}) ", entry.shortcut),
                    Style::default().fg(self.theme.accent_fg),
                ),
                Span::styled(entry.label, label_style),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;

            if !entry.description.is_empty() && y < inner.y + inner.height {
                let desc = Line::from(Span::styled(
                    format!("    {}", entry.description),
                    Style::default().fg(self.theme.dim_fg),
                ));
                buf.set_line(inner.x, y, &desc, inner.width);
                y += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    fn row(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_entries_with_shortcuts() {
        let theme = dark_theme();
        let entries = vec![
            MenuEntry { shortcut: '1', label: "Hello App", description: "" },
            MenuEntry { shortcut: 'q', label: "Quit", description: "Exit program" },
        ];
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        MenuWidget::new(entries, 1, &theme).render(area, &mut buf);

        assert!(row(&buf, 0, 30).contains("Mini App Launcher"));
        assert!(row(&buf, 1, 30).contains("(1) Hello App"));
        assert!(row(&buf, 2, 30).contains("(q) Quit"));
        assert!(row(&buf, 3, 30).contains("Exit program"));
        assert_eq!(buf.cell((5, 2)).unwrap().bg, theme.tree_selected_bg);
    }

    #[test]
    fn short_area_truncates_entries() {
        let theme = dark_theme();
        let entries = vec![
            MenuEntry { shortcut: '1', label: "A", description: "" },
            MenuEntry { shortcut: '2', label: "B", description: "" },
            MenuEntry { shortcut: '3', label: "C", description: "" },
        ];
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        MenuWidget::new(entries, 0, &theme).render(area, &mut buf);
        assert!(row(&buf, 1, 20).contains("(1) A"));
    }
}
