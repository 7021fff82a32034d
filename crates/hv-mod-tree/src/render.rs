//! Pure presentation half of the tree: materialized nodes in, flat rows out.

use crate::types::{DisplayRow, TreeNode};

/// Flatten materialized nodes into display rows, depth-first, parent before
/// children, in listing order. Reads nothing but its input — all fetching and
/// caching happens in [`crate::state::SessionTreeState`].
pub fn render(nodes: &[TreeNode]) -> Vec<DisplayRow> {
    let mut rows = Vec::new();
    walk(nodes, 0, &mut rows);
    rows
}

fn walk(nodes: &[TreeNode], depth: usize, rows: &mut Vec<DisplayRow>) {
    for node in nodes {
        rows.push(DisplayRow {
            depth,
            kind: node.entry.kind,
            name: node.entry.name.clone(),
            path: node.entry.path.clone(),
            expanded: node.children.is_some(),
            download_url: node.entry.download_url.clone(),
        });
        if let Some(children) = &node.children {
            walk(children, depth + 1, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_mod_contents::{DirectoryEntry, EntryKind};

    fn node(name: &str, kind: EntryKind, children: Option<Vec<TreeNode>>) -> TreeNode {
        TreeNode {
            entry: DirectoryEntry { name: name.into(), path: name.into(), kind, download_url: None },
            children,
        }
    }

    #[test]
    fn render_empty_is_empty() {
        assert!(render(&[]).is_empty());
    }

    #[test]
    fn render_nests_one_level_per_depth() {
        let tree = vec![node(
            "a",
            EntryKind::Dir,
            Some(vec![node("b", EntryKind::Dir, Some(vec![node("c", EntryKind::File, None)]))]),
        )];
        let rows = render(&tree);
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, [0, 1, 2]);
    }

    #[test]
    fn render_keeps_sibling_order_and_interleaving() {
        // Files and directories stay exactly as listed — no re-sorting.
        let tree = vec![
            node("zeta.txt", EntryKind::File, None),
            node("alpha", EntryKind::Dir, None),
            node("beta.md", EntryKind::File, None),
        ];
        let names: Vec<String> = render(&tree).into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["zeta.txt", "alpha", "beta.md"]);
    }

    #[test]
    fn collapsed_dir_is_not_expanded_in_rows() {
        let rows = render(&[node("a", EntryKind::Dir, None)]);
        assert!(!rows[0].expanded);
        let rows = render(&[node("a", EntryKind::Dir, Some(vec![]))]);
        assert!(rows[0].expanded);
    }
}
