pub mod api;
pub mod prompts;
pub mod types;

pub use api::{DEFAULT_MODEL, GroqClient};
pub use types::GroqError;
