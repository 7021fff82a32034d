pub mod api;
pub mod error;
pub mod types;

pub use api::ContentsClient;
pub use error::ContentsError;
pub use types::{DirectoryEntry, EntryKind, FileContent, RepoInfo, RepoSummary};
