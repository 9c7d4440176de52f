use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::debug;

use crate::address::Address;
use crate::cli::{Cli, Command, GlobalArgs};
use crate::commands;
use crate::config::{Config, UpdateConfig};
use crate::error::Error;
use crate::logging;
use crate::node::{normalize_endpoint, NodeConnection};
use crate::store::AddressBook;
use crate::tx::{Controller, SigningImpl};
use crate::update::{self, VersionCheckError};

/// Options for one run, fixed once the command line has been parsed.
#[derive(Debug, Clone)]
pub struct Settings {
	/// Node endpoint, always `host:port`.
	pub node: String,
	pub verbose: bool,
	pub signer: Option<String>,
	pub dry_run: bool,
	pub ledger: bool,
	/// Confirmation wait in seconds; 0 leaves the controller default.
	pub timeout: u32,
	pub file: Option<PathBuf>,
	pub pretty: bool,
}

impl Settings {
	/// Merge flags over the config file.
	pub fn new(args: &GlobalArgs, config: &Config) -> Self {
		let node = args.node.as_deref().unwrap_or(&config.node.endpoint);
		Self {
			node: normalize_endpoint(node),
			verbose: args.verbose,
			signer: args.signer.clone(),
			dry_run: args.dry_run,
			ledger: args.ledger,
			timeout: args.timeout,
			file: args.file.clone(),
			pretty: !args.no_pretty,
		}
	}
}

/// Everything a subcommand gets handed once pre-run has succeeded.
pub struct Session {
	pub settings: Settings,
	pub connection: NodeConnection,
	pub signer: Option<Address>,
	pub book: AddressBook,
}

impl Session {
	pub async fn close(self) {
		self.connection.close().await;
	}
}

/// Runs before every subcommand: connect to the node and resolve the signer.
pub async fn pre_run(settings: Settings, config: &Config) -> Result<Session, Error> {
	let connection = NodeConnection::open(&settings.node, config.node.connect_timeout()).await?;

	let book = AddressBook::load()?;
	let signer = match settings.signer.as_deref() {
		Some(value) if !value.is_empty() => {
			let address = resolve_address(value, &book)?;
			debug!(%address, "resolved signer");
			Some(address)
		}
		_ => None,
	};

	Ok(Session {
		settings,
		connection,
		signer,
		book,
	})
}

/// Turn user input into an address: a literal address first, then an
/// account name from the address book.
pub fn resolve_address(value: &str, book: &AddressBook) -> Result<Address, Error> {
	match value.parse::<Address>() {
		Ok(address) => Ok(address),
		Err(parse_err) => {
			if let Some(address) = book.address_of(value) {
				return Ok(address);
			}
			debug!(value, error = %parse_err, "not an address or account name");
			Err(Error::InvalidIdentifier(value.to_owned()))
		}
	}
}

/// Copy the options the user actually set onto `controller`.
pub fn apply_transaction_options(settings: &Settings, controller: &mut Controller) {
	if settings.dry_run {
		controller.behavior.dry_run = true;
	}
	if settings.ledger {
		controller.behavior.signing_impl = SigningImpl::Ledger;
	}
	if settings.timeout > 0 {
		controller.behavior.confirmation_wait_time = settings.timeout;
	}
}

/// Single entry point: run the command line and turn any failure into an
/// annotated message on stderr plus exit status 1.
pub async fn execute() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		// --help and --version are not failures.
		Err(e) if !e.use_stderr() => {
			let _ = e.print();
			return ExitCode::SUCCESS;
		}
		Err(e) => {
			let config = Config::load().ok();
			let err = anyhow::anyhow!(clap_message(&e));
			report_failure(&err, config.as_ref().map(|c| &c.update)).await;
			return ExitCode::FAILURE;
		}
	};

	logging::init(cli.global.verbose);

	let Some(command) = cli.command.as_ref() else {
		return match Cli::command().print_long_help() {
			Ok(()) => ExitCode::SUCCESS,
			Err(e) => {
				report_failure(&anyhow::Error::from(e), None).await;
				ExitCode::FAILURE
			}
		};
	};

	// Without a readable config there is no trustworthy [update] section,
	// so the release check is skipped.
	let config = match Config::load() {
		Ok(config) => config,
		Err(e) => {
			report_failure(&anyhow::Error::from(e), None).await;
			return ExitCode::FAILURE;
		}
	};

	match run(&cli.global, command, &config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			report_failure(&err, Some(&config.update)).await;
			ExitCode::FAILURE
		}
	}
}

async fn run(global: &GlobalArgs, command: &Command, config: &Config) -> Result<()> {
	let settings = Settings::new(global, config);
	debug!(?settings, "settings");

	let session = pre_run(settings, config).await?;
	let result = commands::run(&session, command);
	session.close().await;
	result
}

/// First line of a clap error without its `error: ` prefix.
fn clap_message(e: &clap::Error) -> String {
	let rendered = e.to_string();
	let line = rendered.lines().next().unwrap_or_default();
	line.strip_prefix("error: ").unwrap_or(line).to_owned()
}

async fn report_failure(err: &anyhow::Error, update: Option<&UpdateConfig>) {
	let mut stamp = update::build_stamp();

	if let Some(update) = update.filter(|u| u.enabled) {
		match update::check_version(update, &stamp).await {
			Ok(tag) => {
				stamp.push(':');
				stamp.push_str(&tag);
			}
			Err(warning @ VersionCheckError::Outdated { .. }) => {
				eprintln!("{}", warning.to_string().red());
			}
			Err(e) => debug!(error = %e, "version check skipped"),
		}
	}

	eprintln!("commit: {stamp}, error: {err:#}");
	eprintln!("try adding a `--help` flag");
}
