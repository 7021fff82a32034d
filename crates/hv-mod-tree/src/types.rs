use serde::{Deserialize, Serialize};

use hv_mod_contents::{ContentsError, DirectoryEntry, EntryKind};

/// The repository a tree session is browsing.
///
/// Used as a structured cache-key component — never a formatted string, so
/// separator characters in names cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoKey {
    pub owner: String,
    pub repo: String,
}

impl RepoKey {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self { owner: owner.into(), repo: repo.into() }
    }
}

/// Seam between the tree state machine and the listing client, so tests can
/// count remote calls.
pub trait ChildLister {
    fn list_children(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<DirectoryEntry>, ContentsError>;
}

/// A directory entry materialized to the current expansion depth.
///
/// `children` is `Some` only for directories currently expanded; its entries
/// come from the session fetch cache, in API order.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub entry: DirectoryEntry,
    pub children: Option<Vec<TreeNode>>,
}

/// One visible row of the tree, ready for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Nesting level: root entries are 0, their children 1, and so on.
    pub depth: usize,
    pub kind: EntryKind,
    pub name: String,
    pub path: String,
    /// True for directories whose children are currently shown.
    pub expanded: bool,
    /// Content-retrieval handle, present for files with raw content.
    pub download_url: Option<String>,
}
