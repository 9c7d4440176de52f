use std::fmt;

use anyhow::{bail, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::address::Address;

/// Transactions expire this long after they are built.
const EXPIRATION_MS: i64 = 60_000;

/// How a transaction gets its signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningImpl {
	#[default]
	Software,
	Ledger,
}

impl fmt::Display for SigningImpl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Software => f.write_str("software"),
			Self::Ledger => f.write_str("ledger"),
		}
	}
}

/// Knobs the controller honours while building and submitting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Behavior {
	pub dry_run: bool,
	pub signing_impl: SigningImpl,
	/// Seconds to poll for inclusion after broadcast; 0 does not wait.
	pub confirmation_wait_time: u32,
}

/// An unsigned TRX transfer.
#[derive(Debug, Clone, Serialize)]
pub struct Transfer {
	pub owner_address: Address,
	pub to_address: Address,
	/// Amount in sun (1 TRX = 1_000_000 sun).
	pub amount: u64,
	pub timestamp: i64,
	pub expiration: i64,
}

impl Transfer {
	pub fn new(owner: Address, to: Address, amount: u64) -> Self {
		let timestamp = chrono::Utc::now().timestamp_millis();
		Self {
			owner_address: owner,
			to_address: to,
			amount,
			timestamp,
			expiration: timestamp + EXPIRATION_MS,
		}
	}

	/// SHA-256 over the canonical JSON encoding, hex encoded.
	pub fn txid(&self) -> Result<String> {
		let raw = serde_json::to_vec(self)?;
		Ok(hex::encode(Sha256::digest(raw)))
	}
}

/// What the controller did with a transaction.
#[derive(Debug, Serialize)]
pub struct Receipt {
	pub txid: String,
	pub broadcast: bool,
	pub behavior: Behavior,
	pub transaction: Transfer,
}

/// Drives a transaction from construction to (eventually) confirmation.
#[derive(Debug, Default)]
pub struct Controller {
	pub behavior: Behavior,
}

impl Controller {
	pub fn new() -> Self {
		Self::default()
	}

	/// Run a transfer through the configured behaviour.
	///
	/// Dry runs stop after construction.  Broadcasting needs a signing
	/// backend, which this build does not carry for either implementation.
	pub fn execute(&self, transfer: Transfer) -> Result<Receipt> {
		let txid = transfer.txid()?;
		if !self.behavior.dry_run {
			bail!(
				"{} signing backend is not available in this build; re-run with --dry-run to inspect transaction {txid}",
				self.behavior.signing_impl
			);
		}
		Ok(Receipt {
			txid,
			broadcast: false,
			behavior: self.behavior.clone(),
			transaction: transfer,
		})
	}
}
