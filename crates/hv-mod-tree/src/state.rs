//! Session-scoped expand/collapse state and the directory fetch cache.
//!
//! Remote listing calls are rate-limited and latent, so a directory's
//! children are fetched at most once per session: collapsing keeps the cache
//! entry, re-expanding serves it without a new call. The whole store is torn
//! down only when the session switches to a different repository.

use std::collections::{HashMap, HashSet};

use hv_mod_contents::{ContentsError, DirectoryEntry};

use crate::types::{ChildLister, RepoKey, TreeNode};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NodeKey {
    repo: RepoKey,
    path: String,
}

impl NodeKey {
    fn new(repo: &RepoKey, path: &str) -> Self {
        Self { repo: repo.clone(), path: path.to_string() }
    }
}

/// One instance per browsing session. Owned by the application and passed
/// into the tree operations — deliberately not process-global, so concurrent
/// sessions cannot see each other's expanded paths or cached listings.
#[derive(Debug, Default)]
pub struct SessionTreeState {
    active: Option<RepoKey>,
    expanded: HashSet<NodeKey>,
    children: HashMap<NodeKey, Vec<DirectoryEntry>>,
}

impl SessionTreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` the active repository. Switching away from a different
    /// repository clears the expanded set and the fetch cache — state never
    /// carries over, even when path strings coincide between repos.
    pub fn switch_repo(&mut self, key: &RepoKey) {
        if self.active.as_ref() == Some(key) {
            return;
        }
        self.active = Some(key.clone());
        self.expanded.clear();
        self.children.clear();
    }

    pub fn active_repo(&self) -> Option<&RepoKey> {
        self.active.as_ref()
    }

    pub fn is_expanded(&self, key: &RepoKey, path: &str) -> bool {
        self.expanded.contains(&NodeKey::new(key, path))
    }

    pub fn cached_children(&self, key: &RepoKey, path: &str) -> Option<&[DirectoryEntry]> {
        self.children.get(&NodeKey::new(key, path)).map(|v| v.as_slice())
    }

    /// Flip the expansion of a directory path.
    ///
    /// Expanding a path with no cache entry blocks on `list_children` and
    /// stores the full result before returning; a partial cache entry is
    /// never written. On fetch failure the path stays expanded (it renders
    /// as an empty node) and nothing is cached, so collapse + expand retries
    /// the call. Collapsing never evicts the cache. Files are not part of
    /// this state machine and are ignored.
    pub fn toggle(
        &mut self,
        lister: &dyn ChildLister,
        key: &RepoKey,
        path: &str,
        is_directory: bool,
    ) -> Result<(), ContentsError> {
        if !is_directory {
            return Ok(());
        }
        let node = NodeKey::new(key, path);
        if self.expanded.remove(&node) {
            return Ok(());
        }
        self.expanded.insert(node.clone());
        if self.children.contains_key(&node) {
            return Ok(());
        }
        let entries = lister.list_children(&key.owner, &key.repo, path)?;
        self.children.insert(node, entries);
        Ok(())
    }

    /// Materialize the tree below `root_children` to the current expansion
    /// depth.
    ///
    /// Normally every expanded path already has a cache entry (the `toggle`
    /// contract); an expanded-but-uncached path is fetched here through the
    /// same memo rules. A failed fetch materializes as zero children and
    /// leaves the cache untouched.
    pub fn reveal(
        &mut self,
        lister: &dyn ChildLister,
        key: &RepoKey,
        root_children: &[DirectoryEntry],
    ) -> Vec<TreeNode> {
        root_children.iter().map(|entry| self.reveal_node(lister, key, entry)).collect()
    }

    fn reveal_node(&mut self, lister: &dyn ChildLister, key: &RepoKey, entry: &DirectoryEntry) -> TreeNode {
        if !entry.kind.is_dir() || !self.is_expanded(key, &entry.path) {
            return TreeNode { entry: entry.clone(), children: None };
        }
        let listed = match self.ensure_children(lister, key, &entry.path) {
            Some(entries) => entries,
            None => Vec::new(),
        };
        let children = listed.iter().map(|child| self.reveal_node(lister, key, child)).collect();
        TreeNode { entry: entry.clone(), children: Some(children) }
    }

    fn ensure_children(&mut self, lister: &dyn ChildLister, key: &RepoKey, path: &str) -> Option<Vec<DirectoryEntry>> {
        let node = NodeKey::new(key, path);
        if let Some(cached) = self.children.get(&node) {
            return Some(cached.clone());
        }
        match lister.list_children(&key.owner, &key.repo, path) {
            Ok(entries) => {
                self.children.insert(node, entries.clone());
                Some(entries)
            }
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::types::DisplayRow;
    use hv_mod_contents::EntryKind;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn dir(name: &str, path: &str) -> DirectoryEntry {
        DirectoryEntry { name: name.into(), path: path.into(), kind: EntryKind::Dir, download_url: None }
    }

    fn file(name: &str, path: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
            download_url: Some(format!("https://raw.example/{}", path)),
        }
    }

    /// Mock lister that records every call and serves canned listings.
    struct FakeLister {
        listings: HashMap<String, Vec<DirectoryEntry>>,
        failures: HashMap<String, u16>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeLister {
        fn new() -> Self {
            Self { listings: HashMap::new(), failures: HashMap::new(), calls: RefCell::new(Vec::new()) }
        }

        fn with(mut self, path: &str, entries: Vec<DirectoryEntry>) -> Self {
            self.listings.insert(path.to_string(), entries);
            self
        }

        fn failing(mut self, path: &str, status: u16) -> Self {
            self.failures.insert(path.to_string(), status);
            self
        }

        fn calls_for(&self, path: &str) -> usize {
            self.calls.borrow().iter().filter(|p| p.as_str() == path).count()
        }
    }

    impl ChildLister for FakeLister {
        fn list_children(&self, _owner: &str, _repo: &str, path: &str) -> Result<Vec<DirectoryEntry>, ContentsError> {
            self.calls.borrow_mut().push(path.to_string());
            if let Some(status) = self.failures.get(path) {
                return Err(ContentsError::Api { status: *status, body: "Not Found".into() });
            }
            Ok(self.listings.get(path).cloned().unwrap_or_default())
        }
    }

    fn key() -> RepoKey {
        RepoKey::new("octo", "demo")
    }

    /// Two-level fixture: root holds `src/`, `src/` holds `main.py`.
    fn two_level() -> (FakeLister, Vec<DirectoryEntry>) {
        let lister = FakeLister::new().with("src", vec![file("main.py", "src/main.py")]);
        (lister, vec![dir("src", "src")])
    }

    fn rows(state: &mut SessionTreeState, lister: &FakeLister, roots: &[DirectoryEntry]) -> Vec<DisplayRow> {
        let nodes = state.reveal(lister, &key(), roots);
        render(&nodes)
    }

    #[test]
    fn expand_then_collapse_leaves_cache_intact() {
        let (lister, _) = two_level();
        let mut state = SessionTreeState::new();
        state.toggle(&lister, &key(), "src", true).unwrap();
        assert!(state.is_expanded(&key(), "src"));
        let cached = state.cached_children(&key(), "src").unwrap().to_vec();

        state.toggle(&lister, &key(), "src", true).unwrap();
        assert!(!state.is_expanded(&key(), "src"), "second toggle must collapse");
        assert_eq!(state.cached_children(&key(), "src").unwrap(), cached.as_slice(), "collapse must not evict cache");
    }

    #[test]
    fn re_expand_is_a_cache_hit() {
        let (lister, _) = two_level();
        let mut state = SessionTreeState::new();
        state.toggle(&lister, &key(), "src", true).unwrap();
        state.toggle(&lister, &key(), "src", true).unwrap();
        state.toggle(&lister, &key(), "src", true).unwrap();
        assert!(state.is_expanded(&key(), "src"));
        assert_eq!(lister.calls_for("src"), 1, "expand → collapse → expand must fetch exactly once");
    }

    #[test]
    fn toggling_a_file_is_a_no_op() {
        let (lister, _) = two_level();
        let mut state = SessionTreeState::new();
        state.toggle(&lister, &key(), "README.md", false).unwrap();
        assert!(!state.is_expanded(&key(), "README.md"));
        assert_eq!(lister.calls_for("README.md"), 0);
    }

    #[test]
    fn empty_directory_renders_only_its_own_row() {
        let lister = FakeLister::new().with("empty", vec![]);
        let roots = vec![dir("empty", "empty")];
        let mut state = SessionTreeState::new();
        state.toggle(&lister, &key(), "empty", true).unwrap();
        assert_eq!(state.cached_children(&key(), "empty"), Some(&[][..]));

        let rows = rows(&mut state, &lister, &roots);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].expanded);
    }

    #[test]
    fn two_level_fixture_renders_parent_then_child() {
        let (lister, roots) = two_level();
        let mut state = SessionTreeState::new();
        state.toggle(&lister, &key(), "src", true).unwrap();

        let rows = rows(&mut state, &lister, &roots);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].name.as_str(), rows[0].depth), ("src", 0));
        assert_eq!((rows[1].name.as_str(), rows[1].depth), ("main.py", 1));
        assert_eq!(rows[1].download_url.as_deref(), Some("https://raw.example/src/main.py"));
    }

    #[test]
    fn failed_expand_is_empty_node_and_uncached() {
        let lister = FakeLister::new().failing("gone", 404);
        let roots = vec![dir("gone", "gone")];
        let mut state = SessionTreeState::new();

        let err = state.toggle(&lister, &key(), "gone", true).unwrap_err();
        assert!(matches!(err, ContentsError::Api { status: 404, .. }));
        assert!(state.is_expanded(&key(), "gone"), "failed path renders as expanded-but-empty");
        assert!(state.cached_children(&key(), "gone").is_none(), "failure must not populate the cache");

        let rows = rows(&mut state, &lister, &roots);
        assert_eq!(rows.len(), 1, "no children rows for the failed path");
    }

    #[test]
    fn collapse_and_re_expand_retries_after_failure() {
        let mut lister = FakeLister::new().failing("src", 500);
        let mut state = SessionTreeState::new();
        assert!(state.toggle(&lister, &key(), "src", true).is_err());

        // The remote recovers; collapse then expand re-attempts the fetch.
        lister.failures.clear();
        lister.listings.insert("src".into(), vec![file("main.py", "src/main.py")]);
        state.toggle(&lister, &key(), "src", true).unwrap();
        state.toggle(&lister, &key(), "src", true).unwrap();
        assert_eq!(lister.calls_for("src"), 2);
        assert_eq!(state.cached_children(&key(), "src").map(<[_]>::len), Some(1));
    }

    #[test]
    fn reveal_defensively_fetches_expanded_uncached_paths() {
        let (lister, roots) = two_level();
        let mut state = SessionTreeState::new();
        // Simulate the defensive case: expanded without a cache entry.
        state.expanded.insert(NodeKey::new(&key(), "src"));

        let rows = rows(&mut state, &lister, &roots);
        assert_eq!(rows.len(), 2);
        assert_eq!(lister.calls_for("src"), 1);
        assert!(state.cached_children(&key(), "src").is_some(), "defensive fetch writes through the cache");

        // A second reveal is served from the cache.
        let _ = state.reveal(&lister, &key(), &roots);
        assert_eq!(lister.calls_for("src"), 1);
    }

    #[test]
    fn switching_repo_clears_expansion_and_cache() {
        let (lister, _) = two_level();
        let mut state = SessionTreeState::new();
        let a = RepoKey::new("octo", "demo");
        let b = RepoKey::new("octo", "other");
        state.switch_repo(&a);
        state.toggle(&lister, &a, "src", true).unwrap();

        state.switch_repo(&b);
        assert!(!state.is_expanded(&b, "src"), "path string shared with repo A must start collapsed under B");
        assert!(state.cached_children(&b, "src").is_none());

        // Returning to A is also a fresh session for it.
        state.switch_repo(&a);
        assert!(!state.is_expanded(&a, "src"));
        assert!(state.cached_children(&a, "src").is_none());
    }

    #[test]
    fn switch_to_same_repo_is_a_no_op() {
        let (lister, _) = two_level();
        let mut state = SessionTreeState::new();
        let a = key();
        state.switch_repo(&a);
        state.toggle(&lister, &a, "src", true).unwrap();
        state.switch_repo(&a);
        assert!(state.is_expanded(&a, "src"));
        assert!(state.cached_children(&a, "src").is_some());
    }
}
