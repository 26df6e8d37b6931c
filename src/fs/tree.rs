use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::fs::probe::EntryInfo;

/// Type of tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
    /// Leaf describing a directory that could not be listed.
    ErrorPlaceholder,
    /// Sentinel child of a directory that has not been listed yet.
    LazyPlaceholder,
}

impl NodeKind {
    /// Whether the cursor may rest on a node of this kind.
    pub fn is_selectable(self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::File)
    }
}

/// A node in the directory tree. Children are owned exclusively by their parent.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    /// Empty for placeholder nodes.
    pub path: PathBuf,
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
    pub is_expanded: bool,
    pub depth: usize,
}

impl TreeNode {
    /// Root directory node. Its display name is the full path as given.
    pub fn root(path: &Path) -> Self {
        Self {
            name: path.to_string_lossy().to_string(),
            path: path.to_path_buf(),
            kind: NodeKind::Directory,
            children: Vec::new(),
            is_expanded: false,
            depth: 0,
        }
    }

    fn from_entry(parent: &Path, entry: EntryInfo, depth: usize) -> Self {
        let kind = if entry.is_dir {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        let mut node = Self {
            path: parent.join(&entry.name),
            name: entry.name,
            kind,
            children: Vec::new(),
            is_expanded: false,
            depth,
        };
        if kind == NodeKind::Directory {
            node.attach_lazy_placeholder();
        }
        node
    }

    fn placeholder(kind: NodeKind, name: String, depth: usize) -> Self {
        Self {
            name,
            path: PathBuf::new(),
            kind,
            children: Vec::new(),
            is_expanded: false,
            depth,
        }
    }

    /// Filesystem path this node refers to; `None` for placeholders.
    pub fn reference(&self) -> Option<&Path> {
        match self.kind {
            NodeKind::Directory | NodeKind::File => Some(&self.path),
            NodeKind::ErrorPlaceholder | NodeKind::LazyPlaceholder => None,
        }
    }

    /// Whether this directory still awaits its first (or next) listing.
    pub fn is_unlisted(&self) -> bool {
        self.children.is_empty()
            || (self.children.len() == 1 && self.children[0].kind == NodeKind::LazyPlaceholder)
    }

    /// Replace the children with one node per entry. Subdirectories start
    /// collapsed behind a lazy placeholder.
    pub fn populate(&mut self, entries: Vec<EntryInfo>, dirs_first: bool) {
        let depth = self.depth + 1;
        let mut children: Vec<TreeNode> = entries
            .into_iter()
            .map(|entry| TreeNode::from_entry(&self.path, entry, depth))
            .collect();
        sort_nodes(&mut children, dirs_first);
        self.children = children;
    }

    /// Mark as not yet listed. Only meaningful on directories.
    pub fn attach_lazy_placeholder(&mut self) {
        if self.kind != NodeKind::Directory {
            return;
        }
        self.children = vec![TreeNode::placeholder(
            NodeKind::LazyPlaceholder,
            String::new(),
            self.depth + 1,
        )];
        self.is_expanded = false;
    }

    pub fn expand_and_fill(&mut self, entries: Vec<EntryInfo>, dirs_first: bool) {
        self.is_expanded = true;
        self.populate(entries, dirs_first);
    }

    /// Drop the listed children; the next expansion re-reads the directory.
    pub fn collapse(&mut self) {
        self.is_expanded = false;
        self.children.clear();
        self.attach_lazy_placeholder();
    }

    /// Append a non-selectable leaf describing a listing failure.
    pub fn attach_error_child(&mut self, message: String) {
        self.children.push(TreeNode::placeholder(
            NodeKind::ErrorPlaceholder,
            message,
            self.depth + 1,
        ));
    }

    /// Show a listing failure in place of the children, keeping the node
    /// expanded so the error stays visible.
    pub fn mark_listing_failed(&mut self, message: String) {
        self.children.clear();
        self.is_expanded = true;
        self.attach_error_child(message);
    }
}

/// Case-insensitive name order, optionally with directories first. Stable for a
/// given listing.
fn sort_nodes(nodes: &mut [TreeNode], dirs_first: bool) {
    nodes.sort_by(|a, b| {
        let mut cmp = Ordering::Equal;
        if dirs_first {
            cmp = (b.kind == NodeKind::Directory).cmp(&(a.kind == NodeKind::Directory));
        }
        cmp.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// A flattened representation of a visible tree node for rendering.
#[derive(Debug, Clone)]
pub struct FlatItem {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    pub depth: usize,
    pub is_expanded: bool,
    pub is_last_sibling: bool,
    /// Child indices leading from the root to this node.
    pub location: Vec<usize>,
}

/// State for the tree view: the tree itself plus the cursor over its visible rows.
pub struct TreeState {
    pub root: TreeNode,
    pub flat_items: Vec<FlatItem>,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub dirs_first: bool,
}

impl TreeState {
    /// Wrap a built tree with the cursor on the root.
    pub fn new(root: TreeNode, dirs_first: bool) -> Self {
        let mut state = Self {
            root,
            flat_items: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            dirs_first,
        };
        state.flatten();
        state
    }

    /// Rebuild the flat items list from the tree.
    pub fn flatten(&mut self) {
        self.flat_items.clear();
        let mut location = Vec::new();
        Self::flatten_node(&self.root, &mut self.flat_items, &mut location, true);
        if !self.flat_items.is_empty() && self.selected_index >= self.flat_items.len() {
            self.selected_index = self.flat_items.len() - 1;
        }
    }

    fn flatten_node(
        node: &TreeNode,
        items: &mut Vec<FlatItem>,
        location: &mut Vec<usize>,
        is_last: bool,
    ) {
        items.push(FlatItem {
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            depth: node.depth,
            is_expanded: node.is_expanded,
            is_last_sibling: is_last,
            location: location.clone(),
        });

        if node.is_expanded {
            let count = node.children.len();
            for (i, child) in node.children.iter().enumerate() {
                location.push(i);
                Self::flatten_node(child, items, location, i + 1 == count);
                location.pop();
            }
        }
    }

    /// The row under the cursor, if any.
    pub fn selected_item(&self) -> Option<&FlatItem> {
        self.flat_items.get(self.selected_index)
    }

    /// Mutable access to the node under the cursor.
    pub fn selected_node_mut(&mut self) -> Option<&mut TreeNode> {
        let location = self.selected_item()?.location.clone();
        self.node_at_mut(&location)
    }

    /// Follow a chain of child indices from the root.
    pub fn node_at_mut(&mut self, location: &[usize]) -> Option<&mut TreeNode> {
        let mut node = &mut self.root;
        for &i in location {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Move the cursor to the next selectable row.
    pub fn select_next(&mut self) {
        if let Some(i) = (self.selected_index + 1..self.flat_items.len())
            .find(|&i| self.flat_items[i].kind.is_selectable())
        {
            self.selected_index = i;
        }
    }

    /// Move the cursor to the previous selectable row.
    pub fn select_previous(&mut self) {
        if let Some(i) = (0..self.selected_index)
            .rev()
            .find(|&i| self.flat_items[i].kind.is_selectable())
        {
            self.selected_index = i;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        if let Some(i) = (0..self.flat_items.len())
            .rev()
            .find(|&i| self.flat_items[i].kind.is_selectable())
        {
            self.selected_index = i;
        }
    }

    /// Move the cursor `count` selectable rows down.
    pub fn page_down(&mut self, count: usize) {
        for _ in 0..count {
            self.select_next();
        }
    }

    /// Move the cursor `count` selectable rows up.
    pub fn page_up(&mut self, count: usize) {
        for _ in 0..count {
            self.select_previous();
        }
    }

    /// Move the cursor to the parent of the selected row.
    pub fn select_parent(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let Some((_, parent)) = item.location.split_last() else {
            return;
        };
        let parent = parent.to_vec();
        if let Some(i) = self.flat_items.iter().position(|it| it.location == parent) {
            self.selected_index = i;
        }
    }

    /// Update the scroll offset to ensure the selected item is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index - visible_height + 1;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool) -> EntryInfo {
        EntryInfo {
            name: name.to_string(),
            is_dir,
        }
    }

    /// Checks that every directory is either collapsed behind exactly one lazy
    /// placeholder or expanded without any.
    pub(crate) fn assert_placeholder_invariant(node: &TreeNode) {
        if node.kind == NodeKind::Directory {
            let lazy = node
                .children
                .iter()
                .filter(|c| c.kind == NodeKind::LazyPlaceholder)
                .count();
            if node.is_expanded {
                assert_eq!(lazy, 0, "expanded {:?} holds a lazy placeholder", node.path);
            } else {
                assert_eq!(node.children.len(), 1, "collapsed {:?}", node.path);
                assert_eq!(lazy, 1, "collapsed {:?} lacks a lazy placeholder", node.path);
            }
        } else {
            assert!(node.children.is_empty(), "leaf {:?} has children", node.name);
        }
        for child in &node.children {
            assert_placeholder_invariant(child);
        }
    }

    fn sample_state() -> TreeState {
        let mut root = TreeNode::root(Path::new("/r"));
        root.expand_and_fill(
            vec![entry("b.txt", false), entry("a", true), entry("c", true)],
            true,
        );
        TreeState::new(root, true)
    }

    #[test]
    fn root_uses_full_path_as_name() {
        let root = TreeNode::root(Path::new("/var/log"));
        assert_eq!(root.name, "/var/log");
        assert_eq!(root.depth, 0);
        assert_eq!(root.kind, NodeKind::Directory);
    }

    #[test]
    fn populate_sets_kinds_depths_and_placeholders() {
        let mut root = TreeNode::root(Path::new("/r"));
        root.expand_and_fill(vec![entry("dir", true), entry("file", false)], false);

        assert!(root.is_expanded);
        assert_eq!(root.children.len(), 2);
        let dir = &root.children[0];
        assert_eq!(dir.kind, NodeKind::Directory);
        assert_eq!(dir.depth, 1);
        assert_eq!(dir.path, PathBuf::from("/r/dir"));
        assert!(!dir.is_expanded);
        assert_eq!(dir.children[0].kind, NodeKind::LazyPlaceholder);
        assert_eq!(root.children[1].kind, NodeKind::File);
        assert_placeholder_invariant(&root);
    }

    #[test]
    fn populate_orders_dirs_first_case_insensitively() {
        let mut root = TreeNode::root(Path::new("/r"));
        root.populate(
            vec![entry("Zed.txt", false), entry("beta", true), entry("Alpha", true), entry("apple", false)],
            true,
        );
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "apple", "Zed.txt"]);

        root.populate(
            vec![entry("Zed.txt", false), entry("beta", true), entry("Alpha", true), entry("apple", false)],
            false,
        );
        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "apple", "beta", "Zed.txt"]);
    }

    #[test]
    fn attach_lazy_placeholder_ignores_files() {
        let mut root = TreeNode::root(Path::new("/r"));
        root.populate(vec![entry("f", false)], true);
        let file = &mut root.children[0];
        file.attach_lazy_placeholder();
        assert!(file.children.is_empty());
    }

    #[test]
    fn collapse_discards_children_for_placeholder() {
        let mut root = TreeNode::root(Path::new("/r"));
        root.expand_and_fill(vec![entry("a", true), entry("b", false)], true);
        root.collapse();
        assert!(!root.is_expanded);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].kind, NodeKind::LazyPlaceholder);
        assert!(root.is_unlisted());
        assert_placeholder_invariant(&root);
    }

    #[test]
    fn mark_listing_failed_replaces_placeholder_with_error() {
        let mut root = TreeNode::root(Path::new("/r"));
        root.attach_lazy_placeholder();
        root.mark_listing_failed("Error reading directory: permission denied: /r".into());
        assert!(root.is_expanded);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].kind, NodeKind::ErrorPlaceholder);
        assert!(root.children[0].reference().is_none());
        assert_placeholder_invariant(&root);
    }

    #[test]
    fn flatten_hides_children_of_collapsed_dirs() {
        let state = sample_state();
        let names: Vec<&str> = state.flat_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["/r", "a", "c", "b.txt"]);
        assert!(state.flat_items.last().unwrap().is_last_sibling);
        assert_eq!(state.flat_items[2].location, vec![1]);
    }

    #[test]
    fn navigation_skips_error_rows() {
        let mut state = sample_state();
        state
            .node_at_mut(&[0])
            .unwrap()
            .mark_listing_failed("Error reading directory: boom".into());
        state.flatten();
        // root, a, <error>, c, b.txt
        assert_eq!(state.flat_items[2].kind, NodeKind::ErrorPlaceholder);

        state.selected_index = 1;
        state.select_next();
        assert_eq!(state.selected_item().unwrap().name, "c");
        state.select_previous();
        assert_eq!(state.selected_item().unwrap().name, "a");
    }

    #[test]
    fn select_next_and_previous_clamp() {
        let mut state = sample_state();
        state.select_previous();
        assert_eq!(state.selected_index, 0);
        state.select_last();
        let last = state.selected_index;
        assert_eq!(last, state.flat_items.len() - 1);
        state.select_next();
        assert_eq!(state.selected_index, last);
        state.select_first();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn page_moves_several_rows() {
        let mut state = sample_state();
        state.page_down(2);
        assert_eq!(state.selected_index, 2);
        state.page_up(10);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn select_parent_jumps_to_enclosing_directory() {
        let mut state = sample_state();
        state.selected_index = 3;
        state.select_parent();
        assert_eq!(state.selected_index, 0);
        // Root has no parent.
        state.select_parent();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selected_node_mut_follows_location() {
        let mut state = sample_state();
        state.selected_index = 2;
        let node = state.selected_node_mut().unwrap();
        assert_eq!(node.name, "c");
    }

    #[test]
    fn update_scroll_keeps_selection_visible() {
        let mut state = sample_state();
        state.selected_index = 3;
        state.update_scroll(2);
        assert_eq!(state.scroll_offset, 2);
        state.selected_index = 0;
        state.update_scroll(2);
        assert_eq!(state.scroll_offset, 0);
    }
}
