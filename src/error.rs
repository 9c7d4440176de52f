use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("could not connect to node {endpoint}: {source}")]
	Connection {
		endpoint: String,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid address/invalid account name: {0}")]
	InvalidIdentifier(String),

	#[error("invalid address {value}: {reason}")]
	InvalidAddress { value: String, reason: String },

	#[error("address book error: {0}")]
	AddressBook(String),

	#[error("IO error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML parse error: {0}")]
	TomlParse(#[from] toml::de::Error),

	#[error("TOML serialize error: {0}")]
	TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}
