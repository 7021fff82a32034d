use serde::{Deserialize, Serialize};

/// Entry discriminator as the contents API reports it.
///
/// Symlinks and submodules are rare but real; the tree treats anything that
/// is not a `Dir` as a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        matches!(self, EntryKind::Dir)
    }
}

/// One item of a directory listing from the contents endpoint.
///
/// `path` is the full repository-relative path; `name` is the base name
/// within the parent. `download_url` is present only for files with
/// retrievable raw content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// One repository in a user's repository list.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub id: u64,
}

/// Repository metadata shown in the header and used to seed search queries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub license: Option<LicenseInfo>,
    #[serde(default)]
    pub owner: Option<OwnerInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LicenseInfo {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerInfo {
    pub login: String,
}

/// Contents endpoint payload when the path addresses a single file.
/// `content` is base64 with embedded newlines when `encoding` is "base64".
#[derive(Debug, Deserialize)]
pub(crate) struct FilePayload {
    pub name: String,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A file fetched for viewing: its display name and decoded text.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub name: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_deserializes_with_null_download_url() {
        let json = r#"{"name":"src","path":"src","type":"dir","download_url":null}"#;
        let entry: DirectoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "src");
        assert!(entry.kind.is_dir());
        assert!(entry.download_url.is_none());
    }

    #[test]
    fn entry_kind_maps_file_discriminator() {
        let json = r#"{"name":"main.py","path":"src/main.py","type":"file","download_url":"https://raw.example/main.py"}"#;
        let entry: DirectoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, EntryKind::File);
        assert!(!entry.kind.is_dir());
    }

    #[test]
    fn symlink_is_not_a_dir() {
        assert!(!EntryKind::Symlink.is_dir());
        assert!(!EntryKind::Submodule.is_dir());
    }

    #[test]
    fn repo_info_tolerates_missing_fields() {
        let info: RepoInfo = serde_json::from_str(r#"{"name":"demo"}"#).unwrap();
        assert_eq!(info.name, "demo");
        assert_eq!(info.stargazers_count, 0);
        assert!(info.language.is_none());
    }
}
