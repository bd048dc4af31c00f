use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct Release {
    pub tag_name: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub prerelease: bool,

    /// GitHub sends `null` when a release has no notes
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Name shown in logs, falls back to the tag for untitled releases
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub release: Release,
    pub asset: Asset,
}

#[derive(Debug, Clone, Default)]
pub struct SelectorOptions {
    pub github_repo: String,
    pub asset_regex: Option<String>,
    pub include_prereleases: bool,
    pub sort_by_highest_tag_names: bool,
}

/// Values published after a successful run
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseInfo {
    pub url: String,
    pub version: String,
    pub release_notes: String,
}
