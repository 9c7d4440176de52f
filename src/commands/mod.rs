pub mod accounts;
pub mod address;
pub mod docs;
pub mod node;
pub mod transfer;

use anyhow::Result;
use serde::Serialize;

use crate::cli::Command;
use crate::router::Session;

pub fn run(session: &Session, command: &Command) -> Result<()> {
	match command {
		Command::Docs => docs::run(),
		Command::Accounts { command } => accounts::run(session, command),
		Command::Address { command } => address::run(session, command),
		Command::Node { command } => node::run(session, command),
		Command::Transfer { to, amount } => transfer::run(session, to, *amount),
	}
}

/// Print `value` as JSON, pretty unless `--no-pretty` was given.
pub fn print_json<T: Serialize>(session: &Session, value: &T) -> Result<()> {
	let out = if session.settings.pretty {
		serde_json::to_string_pretty(value)?
	} else {
		serde_json::to_string(value)?
	};
	println!("{out}");
	Ok(())
}
