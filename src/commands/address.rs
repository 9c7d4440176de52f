use anyhow::Result;
use serde::Serialize;

use crate::cli::AddressCommand;
use crate::commands::print_json;
use crate::router::{resolve_address, Session};

#[derive(Serialize)]
struct Resolved<'a> {
	input: &'a str,
	base58: String,
	hex: String,
}

pub fn run(session: &Session, cmd: &AddressCommand) -> Result<()> {
	match cmd {
		AddressCommand::Resolve { value } => {
			let address = resolve_address(value, &session.book)?;
			print_json(
				session,
				&Resolved {
					input: value,
					base58: address.to_base58(),
					hex: address.to_hex(),
				},
			)
		}
	}
}
