use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::fs::tree::{FlatItem, NodeKind, TreeState};
use crate::theme::ThemeColors;

/// Tree widget that renders the directory tree with box-drawing characters.
pub struct TreeWidget<'a> {
    tree_state: &'a TreeState,
    theme: &'a ThemeColors,
    use_icons: bool,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(tree_state: &'a TreeState, theme: &'a ThemeColors, use_icons: bool) -> Self {
        Self {
            tree_state,
            theme,
            use_icons,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Build the prefix string for tree indentation using box-drawing characters.
    ///
    /// Continuation lines depend on whether each ancestor was a last sibling,
    /// found by walking back to the nearest row at that depth.
    fn build_prefix(item: &FlatItem, items: &[FlatItem], item_index: usize) -> String {
        if item.depth == 0 {
            return String::new();
        }

        let mut prefix = String::new();
        for d in 1..item.depth {
            let mut ancestor_is_last = false;
            for j in (0..item_index).rev() {
                if items[j].depth == d {
                    ancestor_is_last = items[j].is_last_sibling;
                    break;
                }
                if items[j].depth < d {
                    break;
                }
            }
            prefix.push_str(if ancestor_is_last { "   " } else { "│  " });
        }

        prefix.push_str(if item.is_last_sibling { "└──" } else { "├──" });
        prefix
    }

    /// Expand/collapse affordance or leaf marker.
    fn item_indicator(&self, item: &FlatItem) -> &'static str {
        if self.use_icons {
            match item.kind {
                NodeKind::Directory if item.is_expanded => "\u{f07c} ",
                NodeKind::Directory => "\u{f07b} ",
                NodeKind::File => "\u{f15b} ",
                NodeKind::ErrorPlaceholder => "\u{f071} ",
                NodeKind::LazyPlaceholder => "",
            }
        } else {
            match item.kind {
                NodeKind::Directory if item.is_expanded => "[-] ",
                NodeKind::Directory => "[+] ",
                NodeKind::File => "    ",
                NodeKind::ErrorPlaceholder => "[!] ",
                NodeKind::LazyPlaceholder => "",
            }
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let items = &self.tree_state.flat_items;
        let selected = self.tree_state.selected_index;
        let visible_height = inner_area.height as usize;

        if items.is_empty() || visible_height == 0 {
            return;
        }

        let scroll = self.tree_state.scroll_offset;
        let visible_items = items.iter().enumerate().skip(scroll).take(visible_height);

        for (i, (idx, item)) in visible_items.enumerate() {
            let y = inner_area.y + i as u16;

            let style = if idx == selected {
                Style::default()
                    .bg(self.theme.tree_selected_bg)
                    .fg(self.theme.tree_selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                match item.kind {
                    NodeKind::Directory => Style::default()
                        .fg(self.theme.tree_dir_fg)
                        .add_modifier(Modifier::BOLD),
                    NodeKind::File => Style::default().fg(self.theme.tree_file_fg),
                    NodeKind::ErrorPlaceholder => Style::default()
                        .fg(self.theme.error_fg)
                        .add_modifier(Modifier::ITALIC),
                    NodeKind::LazyPlaceholder => Style::default().fg(self.theme.dim_fg),
                }
            };

            let prefix = Self::build_prefix(item, items, idx);
            let line = Line::from(vec![
                Span::styled(prefix, Style::default().fg(self.theme.dim_fg)),
                Span::styled(format!("{}{}", self.item_indicator(item), item.name), style),
            ]);
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}
