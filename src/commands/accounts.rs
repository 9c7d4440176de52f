use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};

use crate::address::Address;
use crate::cli::AccountsCommand;
use crate::router::Session;
use crate::store::AddressBook;

pub fn run(session: &Session, cmd: &AccountsCommand) -> Result<()> {
	match cmd {
		AccountsCommand::Add { name, address } => add(session, name, address),
		AccountsCommand::Remove { name } => remove(session, name),
		AccountsCommand::List => list(&session.book),
		AccountsCommand::Import => import(session),
	}
}

fn add(session: &Session, name: &str, address: &str) -> Result<()> {
	let address: Address = address.parse()?;
	let mut book = session.book.clone();
	book.insert(name, address)?;
	book.save()?;
	println!("Added {name} -> {address}");
	Ok(())
}

fn remove(session: &Session, name: &str) -> Result<()> {
	let mut book = session.book.clone();
	let address = book.remove(name)?;
	book.save()?;
	println!("Removed {name} ({address})");
	Ok(())
}

fn list(book: &AddressBook) -> Result<()> {
	if book.is_empty() {
		println!("No accounts registered.");
		return Ok(());
	}
	for (name, address) in book.iter() {
		println!("{name:<20} {address}");
	}
	println!("\n{} account(s) total.", book.len());
	Ok(())
}

/// Import every entry or none: the book is only written when all entries are valid.
fn import(session: &Session) -> Result<()> {
	let path = session
		.settings
		.file
		.as_deref()
		.ok_or_else(|| anyhow!("accounts import needs --file <PATH>"))?;

	let content = std::fs::read_to_string(path)
		.with_context(|| format!("reading {}", path.display()))?;
	let entries: BTreeMap<String, Address> =
		toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

	let mut book = session.book.clone();
	for (name, address) in &entries {
		book.insert(name, *address)?;
	}
	book.save()?;
	println!("Imported {} account(s).", entries.len());
	Ok(())
}
