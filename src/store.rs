use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::Config;
use crate::error::{Error, Result};

const MAX_NAME_LEN: usize = 64;

/// Local account-name → address book, persisted as `accounts.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressBook {
	#[serde(default)]
	accounts: BTreeMap<String, Address>,
}

impl AddressBook {
	/// Path to the address book file.
	pub fn path() -> PathBuf {
		Config::dir().join("accounts.toml")
	}

	/// Load the book from its default location; a missing file is an empty book.
	pub fn load() -> Result<Self> {
		Self::load_from(&Self::path())
	}

	pub fn load_from(path: &Path) -> Result<Self> {
		if !path.exists() {
			return Ok(Self::default());
		}
		let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
		Ok(toml::from_str(&content)?)
	}

	pub fn save(&self) -> Result<()> {
		self.save_to(&Self::path())
	}

	pub fn save_to(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
		}
		std::fs::write(path, toml::to_string_pretty(self)?).map_err(|e| Error::io(path, e))
	}

	/// Look up the address registered under `name`.
	pub fn address_of(&self, name: &str) -> Option<Address> {
		self.accounts.get(name).copied()
	}

	/// Register `name`.  Names that would themselves parse as an address
	/// are refused so that a name can never shadow a literal address.
	pub fn insert(&mut self, name: &str, address: Address) -> Result<()> {
		let name = name.trim();
		if name.is_empty() || name.len() > MAX_NAME_LEN {
			return Err(Error::AddressBook(format!(
				"account name must be 1..={MAX_NAME_LEN} characters"
			)));
		}
		if name.parse::<Address>().is_ok() {
			return Err(Error::AddressBook(format!(
				"account name {name} is itself an address"
			)));
		}
		if self.accounts.contains_key(name) {
			return Err(Error::AddressBook(format!("account {name} already exists")));
		}
		self.accounts.insert(name.to_owned(), address);
		Ok(())
	}

	pub fn remove(&mut self, name: &str) -> Result<Address> {
		self.accounts
			.remove(name)
			.ok_or_else(|| Error::AddressBook(format!("no account named {name}")))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Address)> {
		self.accounts.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.accounts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.accounts.is_empty()
	}
}
