use anyhow::{anyhow, Context, Result};
use release_selector::SelectorOptions;
use std::time::Duration;

use crate::github::GITHUB_API_URL;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub const DESCRIPTION: &str =
    "Get metadata from the latest release from a GitHub project using the GitHub Releases API.";

/// (name, required, description)
pub const INPUT_VARIABLES: &[(&str, bool, &str)] = &[
    (
        "GITHUB_REPO",
        true,
        "Name of a GitHub user and repo, ie. 'MagerValp/AutoDMG'",
    ),
    (
        "ASSET_REGEX",
        false,
        "If set, return only a release asset that matches this regex.",
    ),
    (
        "INCLUDE_PRERELEASES",
        false,
        "If set to a truthy value, include prereleases.",
    ),
    (
        "SORT_BY_HIGHEST_TAG_NAMES",
        false,
        "Sort releases by highest to lowest tag version instead of by date posted. \
         Useful when an 'older' release may be posted later.",
    ),
    ("GITHUB_TOKEN", false, "Token sent as a bearer credential."),
    (
        "GITHUB_API_URL",
        false,
        "API base url, defaults to https://api.github.com",
    ),
    (
        "REQUEST_TIMEOUT_SECS",
        false,
        "HTTP request timeout in seconds, defaults to 60.",
    ),
];

pub const OUTPUT_VARIABLES: &[(&str, &str)] = &[
    ("url", "URL for the first asset found for the project's latest release."),
    ("version", "Version info parsed, naively derived from the release's tag."),
    ("release_notes", "Full release notes body text from the chosen release."),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub selector: SelectorOptions,
    pub github_token: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

/// Empty, `0`, `false`, `no` and `off` are falsy, anything else is truthy.
pub fn parse_flag(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        None => false,
        Some(v) => !matches!(v.as_str(), "" | "0" | "false" | "no" | "off"),
    }
}

pub fn validate_repo(repo: &str) -> Result<()> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(anyhow!(
            "GITHUB_REPO must be of the form 'owner/repo', got '{repo}'"
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let github_repo = non_empty(get("GITHUB_REPO"))
            .ok_or_else(|| anyhow!("GITHUB_REPO not set"))?
            .trim()
            .to_string();
        validate_repo(&github_repo)?;

        let timeout = match non_empty(get("REQUEST_TIMEOUT_SECS")) {
            Some(secs) => secs
                .trim()
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Config {
            selector: SelectorOptions {
                github_repo,
                asset_regex: non_empty(get("ASSET_REGEX")),
                include_prereleases: parse_flag(get("INCLUDE_PRERELEASES").as_deref()),
                sort_by_highest_tag_names: parse_flag(
                    get("SORT_BY_HIGHEST_TAG_NAMES").as_deref(),
                ),
            },
            github_token: non_empty(get("GITHUB_TOKEN")),
            api_url: non_empty(get("GITHUB_API_URL")).unwrap_or_else(|| GITHUB_API_URL.to_string()),
            timeout: Duration::from_secs(timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_parse_flag() {
        assert!(!parse_flag(None));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(Some("False")));
        assert!(!parse_flag(Some(" off ")));
        assert!(!parse_flag(Some("NO")));
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some("True")));
        assert!(parse_flag(Some("yes please")));
    }

    #[test]
    fn test_validate_repo() {
        assert!(validate_repo("MagerValp/AutoDMG").is_ok());
        assert!(validate_repo("AutoDMG").is_err());
        assert!(validate_repo("/AutoDMG").is_err());
        assert!(validate_repo("MagerValp/").is_err());
        assert!(validate_repo("a/b/c").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("GITHUB_REPO", "owner/tool")]).unwrap();
        assert_eq!(config.selector.github_repo, "owner/tool");
        assert_eq!(config.selector.asset_regex, None);
        assert!(!config.selector.include_prereleases);
        assert!(!config.selector.sort_by_highest_tag_names);
        assert_eq!(config.github_token, None);
        assert_eq!(config.api_url, GITHUB_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_all_inputs() {
        let config = config(&[
            ("GITHUB_REPO", " owner/tool "),
            ("ASSET_REGEX", r"tool-.*\.pkg"),
            ("INCLUDE_PRERELEASES", "true"),
            ("SORT_BY_HIGHEST_TAG_NAMES", "1"),
            ("GITHUB_TOKEN", "abc"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.selector.github_repo, "owner/tool");
        assert_eq!(config.selector.asset_regex.as_deref(), Some(r"tool-.*\.pkg"));
        assert!(config.selector.include_prereleases);
        assert!(config.selector.sort_by_highest_tag_names);
        assert_eq!(config.github_token.as_deref(), Some("abc"));
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_or_bad_inputs() {
        assert!(config(&[]).is_err());
        assert!(config(&[("GITHUB_REPO", "  ")]).is_err());
        assert!(config(&[("GITHUB_REPO", "tool")]).is_err());
        assert!(config(&[("GITHUB_REPO", "owner/tool"), ("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_empty_regex_is_unset() {
        let config = config(&[("GITHUB_REPO", "owner/tool"), ("ASSET_REGEX", "")]).unwrap();
        assert_eq!(config.selector.asset_regex, None);
    }
}
