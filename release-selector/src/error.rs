use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("GitHub API returned an error: '{0}'.")]
    Api(String),

    #[error("Unexpected GitHub API status code {0}.")]
    UnexpectedStatus(u16),

    #[error("No releases found for repo '{0}'")]
    NoReleases(String),

    #[error("No release assets were found that satisfy the criteria.")]
    NoEligibleAsset,

    #[error("invalid asset_regex '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, SelectorError>;
