use regex::Regex;
use tracing::info;

pub use error::{Result, SelectorError};
pub use structs::{Asset, Release, ReleaseInfo, Selection, SelectorOptions};
pub mod error;
pub mod structs;
pub mod version;

/// Anything that can list the releases of an `owner/repo` project.
///
/// Returns the releases in API order (newest first) together with the HTTP
/// status code. Transport failures and HTTP error statuses should be returned
/// as `Err`.
#[allow(async_fn_in_trait)]
pub trait ReleaseSource {
    async fn list_releases(&self, repo: &str) -> anyhow::Result<(Vec<Release>, u16)>;
}

pub async fn fetch_releases<S: ReleaseSource>(source: &S, repo: &str) -> Result<Vec<Release>> {
    let (releases, status) = source
        .list_releases(repo)
        .await
        .map_err(|e| SelectorError::Api(format!("{e:#}")))?;

    if status != 200 {
        return Err(SelectorError::UnexpectedStatus(status));
    }

    if releases.is_empty() {
        return Err(SelectorError::NoReleases(repo.to_string()));
    }

    Ok(releases)
}

/// Sorts by tag, highest first. Without `sort_by_highest_tag` the API order
/// (newest published first) is kept.
pub fn order_releases(mut releases: Vec<Release>, sort_by_highest_tag: bool) -> Vec<Release> {
    if sort_by_highest_tag {
        releases.sort_by(|a, b| version::compare_loose(&b.tag_name, &a.tag_name));
    }

    releases
}

pub fn compile_pattern(pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern {
        Some(pattern) if !pattern.is_empty() => Regex::new(pattern)
            .map(Some)
            .map_err(|source| SelectorError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }),
        _ => Ok(None),
    }
}

/// Match must start at the beginning of the name but may end anywhere.
fn matches_at_start(regex: &Regex, name: &str) -> bool {
    regex.find(name).is_some_and(|m| m.start() == 0)
}

/// Returns the first eligible (release, asset) pair in scan order.
pub fn select_asset(
    releases: &[Release],
    include_prereleases: bool,
    regex: Option<&Regex>,
) -> Result<Selection> {
    let mut selected = None;
    for release in releases {
        if release.prerelease && !include_prereleases {
            continue;
        }

        let asset = match regex {
            None => release.assets.first(),
            Some(regex) => release
                .assets
                .iter()
                .find(|asset| matches_at_start(regex, &asset.name)),
        };

        if let Some(asset) = asset {
            if let Some(regex) = regex {
                let names: Vec<&str> = release.assets.iter().map(|a| a.name.as_str()).collect();
                info!(
                    "Matched regex '{}' among asset(s): {}",
                    regex.as_str(),
                    names.join(", ")
                );
            }

            selected = Some(Selection {
                release: release.clone(),
                asset: asset.clone(),
            });
            break;
        }
    }

    let selection = selected.ok_or(SelectorError::NoEligibleAsset)?;
    info!(
        "Selected asset '{}' from release '{}'",
        selection.asset.name,
        selection.release.display_name()
    );

    Ok(selection)
}

/// Naive version from a tag: `v1.2.3` -> `1.2.3`, `proj-1.2.3` -> `1.2.3`
/// for repo `owner/proj`.
pub fn version_from_tag(tag: &str, repo: &str) -> String {
    if let Some(version) = tag.strip_prefix('v') {
        return version.to_string();
    }

    let short_name = repo.split_once('/').map(|(_, name)| name).unwrap_or(repo);
    let stripped = tag.replacen(short_name, "", 1);
    let version = stripped.trim_start_matches('-').to_string();

    info!("Current tag version: {version}");
    version
}

pub fn derive_outputs(selection: Selection, repo: &str) -> ReleaseInfo {
    let Selection { release, asset } = selection;

    ReleaseInfo {
        url: asset.browser_download_url,
        version: version_from_tag(&release.tag_name, repo),
        release_notes: release.body.unwrap_or_default(),
    }
}

/// Full run: fetch, order, select, derive. Outputs only exist on success.
pub async fn find_release_info<S: ReleaseSource>(
    source: &S,
    options: &SelectorOptions,
) -> Result<ReleaseInfo> {
    let regex = compile_pattern(options.asset_regex.as_deref())?;

    let releases = fetch_releases(source, &options.github_repo).await?;
    let releases = order_releases(releases, options.sort_by_highest_tag_names);
    let selection = select_asset(&releases, options.include_prereleases, regex.as_ref())?;

    Ok(derive_outputs(selection, &options.github_repo))
}
