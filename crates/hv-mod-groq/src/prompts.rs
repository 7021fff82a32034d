//! Prompt builders for the two assistant flows: questions about a repository
//! and questions about a single code file.

use hv_mod_contents::RepoInfo;

pub const REPOSITORY_SYSTEM: &str = "You are an AI assistant specialized in analyzing GitHub repositories. \
     Provide helpful, accurate, and concise responses based on the repository information.";

pub const CODE_SYSTEM: &str = "You are an AI coding assistant specialized in analyzing code. \
     Provide helpful, accurate, and concise responses based on the provided code.";

/// User message for a repository-level question: metadata header + the query.
pub fn repository_query(info: &RepoInfo, query: &str) -> String {
    let owner = info.owner.as_ref().map(|o| o.login.as_str()).unwrap_or("Unknown");
    format!(
        "Repository Details:\n\
         Name: {}\n\
         Owner: {}\n\
         Description: {}\n\
         Primary Language: {}\n\n\
         User Query: {}",
        info.name,
        owner,
        info.description.as_deref().unwrap_or("No description available"),
        info.language.as_deref().unwrap_or("Unknown"),
        query,
    )
}

/// User message for a code-file question: the file content + the query.
pub fn code_query(file_name: &str, code: &str, query: &str) -> String {
    format!(
        "Code Content ({}):\n\n{}\n\nUser Query: {}",
        file_name, code, query,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_mod_contents::RepoInfo;

    #[test]
    fn repository_query_includes_metadata_and_question() {
        let info: RepoInfo = serde_json::from_str(
            r#"{"name":"demo","description":"a demo","language":"Rust","owner":{"login":"octo"}}"#,
        )
        .unwrap();
        let prompt = repository_query(&info, "what does it do?");
        assert!(prompt.contains("Name: demo"));
        assert!(prompt.contains("Owner: octo"));
        assert!(prompt.contains("Description: a demo"));
        assert!(prompt.contains("Primary Language: Rust"));
        assert!(prompt.contains("what does it do?"));
    }

    #[test]
    fn repository_query_defaults_missing_fields() {
        let info: RepoInfo = serde_json::from_str(r#"{"name":"bare"}"#).unwrap();
        let prompt = repository_query(&info, "q");
        assert!(prompt.contains("Owner: Unknown"));
        assert!(prompt.contains("No description available"));
        assert!(prompt.contains("Primary Language: Unknown"));
    }

    #[test]
    fn code_query_embeds_file_and_question() {
        let prompt = code_query("main.py", "print('hi')", "explain this");
        assert!(prompt.contains("main.py"));
        assert!(prompt.contains("print('hi')"));
        assert!(prompt.ends_with("explain this"));
    }
}
