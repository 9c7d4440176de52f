use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable that relocates the state directory.
pub const HOME_ENV: &str = "TRONCTL_HOME";

pub const DEFAULT_NODE: &str = "grpc.trongrid.io:50051";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_REPOSITORY: &str = "fbsobreira/gotron-sdk";
const DEFAULT_UPDATE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub node: NodeConfig,
	#[serde(default)]
	pub update: UpdateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
	/// Node used when `--node` is not given.
	#[serde(default = "default_node")]
	pub endpoint: String,
	#[serde(default = "default_connect_timeout")]
	pub connect_timeout_secs: u64,
}

/// Where and how the release check looks for newer builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
	#[serde(default = "default_true")]
	pub enabled: bool,
	#[serde(default = "default_api_base")]
	pub api_base: String,
	/// `owner/name` of the repository whose releases are checked.
	#[serde(default = "default_repository")]
	pub repository: String,
	#[serde(default = "default_update_timeout")]
	pub timeout_secs: u64,
}

impl Default for NodeConfig {
	fn default() -> Self {
		Self {
			endpoint: default_node(),
			connect_timeout_secs: default_connect_timeout(),
		}
	}
}

impl Default for UpdateConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			api_base: default_api_base(),
			repository: default_repository(),
			timeout_secs: default_update_timeout(),
		}
	}
}

impl Config {
	/// Directory where CLI state is stored (`$TRONCTL_HOME` or `~/.tronctl/`).
	pub fn dir() -> PathBuf {
		if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
			return PathBuf::from(home);
		}
		dirs::home_dir()
			.unwrap_or_else(|| PathBuf::from("."))
			.join(".tronctl")
	}

	/// Path to the config file.
	pub fn path() -> PathBuf {
		Self::dir().join("config.toml")
	}

	/// Load config from disk, falling back to defaults if no file exists.
	pub fn load() -> Result<Self> {
		let path = Self::path();
		if !path.exists() {
			return Ok(Self::default());
		}
		let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
		Ok(toml::from_str(&content)?)
	}
}

impl NodeConfig {
	/// A zero timeout falls back to the default.
	pub fn connect_timeout(&self) -> Duration {
		secs_or(self.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS)
	}
}

impl UpdateConfig {
	/// A zero timeout falls back to the default.
	pub fn timeout(&self) -> Duration {
		secs_or(self.timeout_secs, DEFAULT_UPDATE_TIMEOUT_SECS)
	}

	pub fn latest_release_url(&self) -> String {
		format!(
			"{}/repos/{}/releases/latest",
			self.api_base.trim_end_matches('/'),
			self.repository
		)
	}

	pub fn tag_url(&self, tag: &str) -> String {
		format!(
			"{}/repos/{}/git/ref/tags/{tag}",
			self.api_base.trim_end_matches('/'),
			self.repository
		)
	}
}

fn secs_or(secs: u64, fallback: u64) -> Duration {
	Duration::from_secs(if secs == 0 { fallback } else { secs })
}

fn default_node() -> String {
	DEFAULT_NODE.into()
}

const fn default_connect_timeout() -> u64 {
	DEFAULT_CONNECT_TIMEOUT_SECS
}

const fn default_true() -> bool {
	true
}

fn default_api_base() -> String {
	DEFAULT_API_BASE.into()
}

fn default_repository() -> String {
	DEFAULT_REPOSITORY.into()
}

const fn default_update_timeout() -> u64 {
	DEFAULT_UPDATE_TIMEOUT_SECS
}
