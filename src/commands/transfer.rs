use anyhow::{anyhow, Result};

use crate::commands::print_json;
use crate::router::{apply_transaction_options, resolve_address, Session};
use crate::tx::{Controller, Transfer};

pub fn run(session: &Session, to: &str, amount: u64) -> Result<()> {
	let owner = session
		.signer
		.ok_or_else(|| anyhow!("transfer needs a signer; pass --signer <address|name>"))?;
	let to = resolve_address(to, &session.book)?;
	if amount == 0 {
		anyhow::bail!("transfer amount must be greater than zero");
	}

	let mut controller = Controller::new();
	apply_transaction_options(&session.settings, &mut controller);

	let receipt = controller.execute(Transfer::new(owner, to, amount))?;
	print_json(session, &receipt)
}
