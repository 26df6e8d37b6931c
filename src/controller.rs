//! Two-screen state machine behind the directory tree panel.
//!
//! Every user action arrives as a [`TreeEvent`] and is resolved against a
//! snapshot of the selected row ([`Selection`]) in one central dispatch, so the
//! whole panel can be driven and inspected without a terminal.

use std::path::{Path, PathBuf};

use crate::fs::builder::{listing_error_message, TreeBuilder, DEFAULT_MAX_EAGER_DEPTH};
use crate::fs::opener::Opener;
use crate::fs::probe::FilesystemProbe;
use crate::fs::tree::{FlatItem, NodeKind, TreeState};

/// Which screen of the panel is active.
pub enum Screen {
    EnteringPath,
    /// The tree is owned by the screen; leaving it discards the tree.
    ViewingTree(TreeState),
}

/// Abstract user input understood by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    Escape,
    Submit(String),
    Toggle,
    /// Expand the selection if it is a collapsed directory.
    Expand,
    /// Collapse the selection if expanded, otherwise move to its parent.
    CollapseOrParent,
    Open,
    Up,
    Down,
    First,
    Last,
    PageUp(usize),
    PageDown(usize),
}

/// What the hosting shell should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Relinquish control back to the launcher.
    Exit,
}

/// Text shown in the panel's message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Tree building options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeSettings {
    pub max_eager_depth: usize,
    pub dirs_first: bool,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            max_eager_depth: DEFAULT_MAX_EAGER_DEPTH,
            dirs_first: true,
        }
    }
}

/// Snapshot of the selected row, classified for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    Nothing,
    CollapsedDir(PathBuf),
    ExpandedDir(PathBuf),
    File(PathBuf),
    Placeholder,
}

impl Selection {
    fn of(item: Option<&FlatItem>) -> Self {
        let Some(item) = item else {
            return Selection::Nothing;
        };
        match item.kind {
            NodeKind::Directory if item.is_expanded => Selection::ExpandedDir(item.path.clone()),
            NodeKind::Directory => Selection::CollapsedDir(item.path.clone()),
            NodeKind::File => Selection::File(item.path.clone()),
            NodeKind::ErrorPlaceholder | NodeKind::LazyPlaceholder => Selection::Placeholder,
        }
    }
}

pub struct TreeController {
    probe: Box<dyn FilesystemProbe>,
    opener: Box<dyn Opener>,
    settings: TreeSettings,
    screen: Screen,
    message: Option<StatusMessage>,
}

impl TreeController {
    pub fn new(
        probe: Box<dyn FilesystemProbe>,
        opener: Box<dyn Opener>,
        settings: TreeSettings,
    ) -> Self {
        Self {
            probe,
            opener,
            settings,
            screen: Screen::EnteringPath,
            message: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn tree(&self) -> Option<&TreeState> {
        match &self.screen {
            Screen::ViewingTree(state) => Some(state),
            Screen::EnteringPath => None,
        }
    }

    pub fn tree_mut(&mut self) -> Option<&mut TreeState> {
        match &mut self.screen {
            Screen::ViewingTree(state) => Some(state),
            Screen::EnteringPath => None,
        }
    }

    pub fn is_viewing_tree(&self) -> bool {
        matches!(self.screen, Screen::ViewingTree(_))
    }

    /// Back to a fresh path entry screen.
    pub fn reset(&mut self) {
        self.screen = Screen::EnteringPath;
        self.message = None;
    }

    /// Apply one event. Events that do not belong to the active screen are ignored.
    pub fn dispatch(&mut self, event: TreeEvent) -> Outcome {
        if !self.is_viewing_tree() {
            match event {
                TreeEvent::Escape => return Outcome::Exit,
                TreeEvent::Submit(text) => self.submit(&text),
                _ => {}
            }
            return Outcome::Continue;
        }

        match event {
            TreeEvent::Escape => self.reset(),
            TreeEvent::Submit(_) => {}
            TreeEvent::Toggle => self.toggle(),
            TreeEvent::Expand => self.expand(),
            TreeEvent::CollapseOrParent => self.collapse_or_parent(),
            TreeEvent::Open => self.open_selected(),
            nav => self.navigate(nav),
        }
        Outcome::Continue
    }

    fn submit(&mut self, text: &str) {
        if text.is_empty() {
            self.message = Some(StatusMessage::error("Path cannot be empty."));
            return;
        }

        let root = expand_tilde(text);
        let built = TreeBuilder::new(self.probe.as_ref())
            .max_eager_depth(self.settings.max_eager_depth)
            .dirs_first(self.settings.dirs_first)
            .build(&root);
        match built {
            Ok(tree) => {
                tracing::info!(root = %root.display(), "viewing directory tree");
                self.screen = Screen::ViewingTree(TreeState::new(tree, self.settings.dirs_first));
                self.message = None;
            }
            Err(e) => {
                tracing::debug!(root = %root.display(), error = %e, "tree build rejected");
                self.message = Some(StatusMessage::error(format!("Error: {}", e)));
            }
        }
    }

    fn selection(&self) -> Selection {
        Selection::of(self.tree().and_then(|state| state.selected_item()))
    }

    fn toggle(&mut self) {
        match self.selection() {
            Selection::CollapsedDir(path) => self.list_into_selected(&path),
            Selection::ExpandedDir(path) => self.collapse_selected(&path),
            Selection::File(_) | Selection::Placeholder | Selection::Nothing => {}
        }
    }

    fn expand(&mut self) {
        if let Selection::CollapsedDir(path) = self.selection() {
            self.list_into_selected(&path);
        }
    }

    fn collapse_or_parent(&mut self) {
        match self.selection() {
            Selection::ExpandedDir(path) => self.collapse_selected(&path),
            _ => {
                if let Some(state) = self.tree_mut() {
                    state.select_parent();
                }
            }
        }
    }

    /// Re-read the selected directory from the filesystem and show its
    /// children, or an error row if listing fails.
    fn list_into_selected(&mut self, path: &Path) {
        let Screen::ViewingTree(state) = &mut self.screen else {
            return;
        };
        if !state.selected_node_mut().is_some_and(|n| n.is_unlisted()) {
            return;
        }
        let listing = self.probe.list_children(path);
        let dirs_first = state.dirs_first;
        let Some(node) = state.selected_node_mut() else {
            return;
        };
        match listing {
            Ok(entries) => {
                tracing::debug!(dir = %path.display(), count = entries.len(), "expanded directory");
                node.expand_and_fill(entries, dirs_first);
            }
            Err(e) => {
                tracing::warn!(dir = %path.display(), error = %e, "listing failed on expand");
                node.mark_listing_failed(listing_error_message(&e));
            }
        }
        state.flatten();
    }

    fn collapse_selected(&mut self, path: &Path) {
        let Some(state) = self.tree_mut() else {
            return;
        };
        if let Some(node) = state.selected_node_mut() {
            tracing::debug!(dir = %path.display(), "collapsed directory");
            node.collapse();
            state.flatten();
        }
    }

    fn navigate(&mut self, event: TreeEvent) {
        let Some(state) = self.tree_mut() else {
            return;
        };
        match event {
            TreeEvent::Up => state.select_previous(),
            TreeEvent::Down => state.select_next(),
            TreeEvent::First => state.select_first(),
            TreeEvent::Last => state.select_last(),
            TreeEvent::PageUp(n) => state.page_up(n),
            TreeEvent::PageDown(n) => state.page_down(n),
            _ => {}
        }
    }

    /// Ask the OS to open the selected folder. Only a directory node that the
    /// filesystem still confirms to be a directory reaches the opener; file
    /// nodes, symlinks included, are rejected without touching the disk.
    fn open_selected(&mut self) {
        let path = match self.selection() {
            Selection::Nothing => {
                self.message = Some(StatusMessage::error("No item selected."));
                return;
            }
            Selection::Placeholder => {
                self.message = Some(StatusMessage::error("Selected item has no path reference."));
                return;
            }
            Selection::File(_) => {
                self.message = Some(StatusMessage::error("Selected item is not a directory."));
                return;
            }
            Selection::CollapsedDir(path) | Selection::ExpandedDir(path) => path,
        };

        let message = match self.probe.stat(&path) {
            Err(e) => StatusMessage::error(format!("Error getting file info: {}", e)),
            Ok(stat) if !stat.is_dir => StatusMessage::error("Selected item is not a directory."),
            Ok(_) => match self.opener.open(&path) {
                Ok(()) => StatusMessage::info(format!("Opened folder: {}", path.display())),
                Err(e) => StatusMessage::error(format!("Error opening folder: {}", e)),
            },
        };
        self.message = Some(message);
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(text: &str) -> PathBuf {
    if text == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(text)
}
