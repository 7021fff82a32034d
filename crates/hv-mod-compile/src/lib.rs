pub mod api;
pub mod types;

pub use api::{CompileClient, language_for_path};
pub use types::{CompileError, ExecuteOutcome};
