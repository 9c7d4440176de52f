use anyhow::Result;
use serde::Serialize;

use crate::cli::NodeCommand;
use crate::commands::print_json;
use crate::router::Session;

#[derive(Serialize)]
struct Status<'a> {
	node: &'a str,
	connected: bool,
	latency_ms: u128,
	signer: Option<String>,
}

pub fn run(session: &Session, cmd: &NodeCommand) -> Result<()> {
	match cmd {
		NodeCommand::Status => print_json(
			session,
			&Status {
				node: session.connection.endpoint(),
				connected: true,
				latency_ms: session.connection.latency().as_millis(),
				signer: session.signer.map(|a| a.to_base58()),
			},
		),
	}
}
