pub mod render;
pub mod state;
pub mod types;

pub use render::render;
pub use state::SessionTreeState;
pub use types::{ChildLister, DisplayRow, RepoKey, TreeNode};

use hv_mod_contents::{ContentsClient, ContentsError, DirectoryEntry};

impl ChildLister for ContentsClient {
    fn list_children(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<DirectoryEntry>, ContentsError> {
        ContentsClient::list_children(self, owner, repo, path)
    }
}
