use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Prefix byte of every mainnet Tron account address.
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Length of an address payload: prefix byte plus a 20-byte account hash.
pub const ADDRESS_LEN: usize = 21;

/// A validated Tron account address.
///
/// The canonical textual form is base58check (`T...`, 34 characters) with a
/// double-SHA256 checksum.  Two addresses are equal iff their bytes are.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
	/// Build an address from the 20-byte account hash.
	pub fn from_account_hash(hash: [u8; 20]) -> Self {
		let mut bytes = [0u8; ADDRESS_LEN];
		bytes[0] = ADDRESS_PREFIX;
		bytes[1..].copy_from_slice(&hash);
		Self(bytes)
	}

	pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
		&self.0
	}

	/// Base58check rendering.
	pub fn to_base58(&self) -> String {
		bs58::encode(self.0).with_check().into_string()
	}

	/// Lowercase hex rendering including the `41` prefix.
	pub fn to_hex(&self) -> String {
		hex::encode(self.0)
	}
}

impl FromStr for Address {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = |reason: String| Error::InvalidAddress {
			value: s.to_owned(),
			reason,
		};

		let payload = bs58::decode(s.trim())
			.with_check(None)
			.into_vec()
			.map_err(|e| invalid(e.to_string()))?;

		let bytes: [u8; ADDRESS_LEN] = payload
			.as_slice()
			.try_into()
			.map_err(|_| invalid(format!("expected {ADDRESS_LEN} bytes, got {}", payload.len())))?;

		if bytes[0] != ADDRESS_PREFIX {
			return Err(invalid(format!("unexpected prefix byte 0x{:02x}", bytes[0])));
		}

		Ok(Self(bytes))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_base58())
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Address({})", self.to_base58())
	}
}

impl Serialize for Address {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_base58())
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}
