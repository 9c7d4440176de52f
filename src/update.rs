//! Best-effort "is there a newer release?" check.
//!
//! Runs only after a command has already failed.  Every outcome other than
//! a clean match is reported as a [`VersionCheckError`], and none of them
//! may turn a failure into something worse than an annotated error line.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::UpdateConfig;

/// The running build: `v<version>-<commit prefix>`, or just `v<version>`
/// when the commit was not provided at compile time.
pub fn build_stamp() -> String {
	match option_env!("TRONCTL_COMMIT") {
		Some(commit) if !commit.is_empty() => {
			format!("v{}-{commit}", env!("CARGO_PKG_VERSION"))
		}
		_ => format!("v{}", env!("CARGO_PKG_VERSION")),
	}
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum VersionCheckError {
	#[error("could not fetch version: {0}")]
	Fetch(String),

	#[error("Warning: Using outdated version. Redownload to upgrade to {latest}")]
	Outdated { latest: String },

	#[error("cannot determine version status: {0}")]
	Undetermined(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
	pub id: u64,
	pub name: String,
	pub size: u64,
	#[serde(rename = "browser_download_url")]
	pub url: String,
}

/// `GET /repos/{repo}/releases/latest`
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
	#[serde(default)]
	pub prerelease: bool,
	pub tag_name: String,
	#[serde(default)]
	pub target_commitish: String,
	#[serde(default)]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagObject {
	pub sha: String,
}

/// `GET /repos/{repo}/git/ref/tags/{tag}`
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
	#[serde(rename = "ref")]
	pub reference: String,
	#[serde(default)]
	pub node_id: String,
	#[serde(default)]
	pub url: String,
	pub object: TagObject,
}

/// Fetch the latest release and compare its tagged commit with `stamp`.
///
/// Returns the latest tag name when the running build is current.
pub async fn check_version(config: &UpdateConfig, stamp: &str) -> Result<String, VersionCheckError> {
	// A stamp without a usable commit can never be compared; skip the requests.
	stamp_commit(stamp)?;

	let client = reqwest::Client::builder()
		.timeout(config.timeout())
		.user_agent(concat!("tronctl/", env!("CARGO_PKG_VERSION")))
		.build()
		.map_err(|e| VersionCheckError::Fetch(e.to_string()))?;

	let release: Release = fetch_json(&client, &config.latest_release_url()).await?;
	let tag: Tag = fetch_json(&client, &config.tag_url(&release.tag_name)).await?;
	debug!(tag = %release.tag_name, sha = %tag.object.sha, "latest release");

	compare(stamp, &release.tag_name, &tag.object.sha)
}

/// Decide whether a build stamp matches the commit behind `latest_tag`.
pub fn compare(stamp: &str, latest_tag: &str, sha: &str) -> Result<String, VersionCheckError> {
	let commit = stamp_commit(stamp)?;
	if sha.len() < 8 || !sha.is_char_boundary(commit.len()) {
		return Err(VersionCheckError::Undetermined(format!("short commit sha {sha:?}")));
	}

	if sha[..commit.len()].eq_ignore_ascii_case(commit) {
		Ok(latest_tag.to_owned())
	} else {
		Err(VersionCheckError::Outdated {
			latest: latest_tag.to_owned(),
		})
	}
}

/// The commit segment after the last `-`, which must be a 7 or 8 digit hex prefix.
fn stamp_commit(stamp: &str) -> Result<&str, VersionCheckError> {
	let (_, commit) = stamp
		.rsplit_once('-')
		.ok_or_else(|| VersionCheckError::Undetermined(format!("build stamp {stamp:?} has no commit")))?;

	let valid = matches!(commit.len(), 7 | 8) && commit.bytes().all(|b| b.is_ascii_hexdigit());
	if !valid {
		return Err(VersionCheckError::Undetermined(format!(
			"build stamp commit {commit:?} is not a 7 or 8 digit hex prefix"
		)));
	}
	Ok(commit)
}

async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T, VersionCheckError> {
	let resp = client
		.get(url)
		.send()
		.await
		.map_err(|e| VersionCheckError::Fetch(e.to_string()))?;

	let status = resp.status();
	if !status.is_success() {
		return Err(VersionCheckError::Fetch(format!("{url} returned {status}")));
	}

	resp.json()
		.await
		.map_err(|e| VersionCheckError::Fetch(e.to_string()))
}
