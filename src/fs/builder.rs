use std::path::Path;

use crate::error::{AppError, ProbeError, Result};
use crate::fs::probe::FilesystemProbe;
use crate::fs::tree::{NodeKind, TreeNode};

/// Default number of tree levels listed at build time.
pub const DEFAULT_MAX_EAGER_DEPTH: usize = 3;

/// Materializes a directory tree down to a bounded depth. Directories at or
/// below the cutoff are left collapsed behind a lazy placeholder.
pub struct TreeBuilder<'a> {
    probe: &'a dyn FilesystemProbe,
    max_eager_depth: usize,
    dirs_first: bool,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(probe: &'a dyn FilesystemProbe) -> Self {
        Self {
            probe,
            max_eager_depth: DEFAULT_MAX_EAGER_DEPTH,
            dirs_first: true,
        }
    }

    pub fn max_eager_depth(mut self, depth: usize) -> Self {
        self.max_eager_depth = depth;
        self
    }

    pub fn dirs_first(mut self, dirs_first: bool) -> Self {
        self.dirs_first = dirs_first;
        self
    }

    /// Validate `root` and build its tree. Listing failures below the root
    /// become error rows; only an unusable root fails the build.
    pub fn build(&self, root: &Path) -> Result<TreeNode> {
        let mut node = self.create_root(root)?;
        self.fill(&mut node);
        tracing::debug!(
            root = %root.display(),
            max_eager_depth = self.max_eager_depth,
            "built directory tree"
        );
        Ok(node)
    }

    fn create_root(&self, root: &Path) -> Result<TreeNode> {
        match self.probe.stat(root) {
            Ok(stat) if stat.is_dir => Ok(TreeNode::root(root)),
            Ok(_) => Err(AppError::NotADirectory(root.display().to_string())),
            Err(e @ ProbeError::NotFound(_)) => Err(AppError::InvalidPath(e.to_string())),
            Err(e) => Err(AppError::Probe(e)),
        }
    }

    fn fill(&self, node: &mut TreeNode) {
        if node.depth >= self.max_eager_depth {
            node.attach_lazy_placeholder();
            return;
        }
        match self.probe.list_children(&node.path) {
            Ok(entries) => {
                node.expand_and_fill(entries, self.dirs_first);
                for child in node
                    .children
                    .iter_mut()
                    .filter(|c| c.kind == NodeKind::Directory)
                {
                    self.fill(child);
                }
            }
            Err(e) => {
                tracing::warn!(dir = %node.path.display(), error = %e, "listing failed during build");
                node.mark_listing_failed(listing_error_message(&e));
            }
        }
    }
}

/// Label of the error row shown under a directory that could not be listed.
pub fn listing_error_message(err: &ProbeError) -> String {
    format!("Error reading directory: {}", err)
}
