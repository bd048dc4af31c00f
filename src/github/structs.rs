use release_selector::{Asset, Release};
use serde::Deserialize;

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubRelease {
    #[serde(rename = "tag_name")]
    pub tag_name: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(rename = "published_at", default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub assets: Vec<GithubAsset>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubAsset {
    pub name: String,

    #[serde(default)]
    pub size: i64,

    #[serde(rename = "browser_download_url")]
    pub browser_download_url: String,
}

impl From<GithubAsset> for Asset {
    fn from(asset: GithubAsset) -> Self {
        Asset {
            name: asset.name,
            browser_download_url: asset.browser_download_url,
        }
    }
}

impl From<GithubRelease> for Release {
    fn from(release: GithubRelease) -> Self {
        Release {
            tag_name: release.tag_name,
            name: release.name,
            prerelease: release.prerelease,
            body: release.body,
            assets: release.assets.into_iter().map(Asset::from).collect(),
        }
    }
}
