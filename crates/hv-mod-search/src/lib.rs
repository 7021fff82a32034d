pub mod api;
pub mod types;

pub use api::{SearchClient, digest_prompt};
pub use types::{SearchError, SearchKind, SearchResult};
