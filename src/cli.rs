use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Seconds to wait for confirmation unless `--timeout` says otherwise.
pub const DEFAULT_TIMEOUT: u32 = 20;

#[derive(Parser)]
#[command(
	name = "tronctl",
	about = "Tron Blockchain Controller",
	long_about = "CLI interface to the Tron blockchain.\n\ntype 'tronctl --help' for details",
	version
)]
pub struct Cli {
	#[command(flatten)]
	pub global: GlobalArgs,

	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
	/// Dump out debug information, same as env var TRONCTL_DEBUG=true.
	#[arg(short, long, global = true, env = "TRONCTL_DEBUG")]
	pub verbose: bool,

	/// Account address or account name used to sign.
	#[arg(short, long, global = true, value_name = "SIGNER")]
	pub signer: Option<String>,

	/// Node host, with optional port (default port 50051).
	#[arg(short, long, global = true, value_name = "HOST")]
	pub node: Option<String>,

	/// Disable pretty print JSON outputs.
	#[arg(long, global = true)]
	pub no_pretty: bool,

	/// Do not send signed transaction.
	#[arg(long, global = true)]
	pub dry_run: bool,

	/// Set timeout in seconds. Set to 0 to not wait for confirm.
	#[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT)]
	pub timeout: u32,

	/// Use ledger hardware wallet.
	#[arg(short = 'e', long, global = true)]
	pub ledger: bool,

	/// Path to file for given command when applicable.
	#[arg(long, global = true, value_name = "PATH")]
	pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
	/// Generate docs to a local tronctl-docs directory.
	Docs,

	/// Manage the local account-name address book.
	Accounts {
		#[command(subcommand)]
		command: AccountsCommand,
	},

	/// Inspect addresses.
	Address {
		#[command(subcommand)]
		command: AddressCommand,
	},

	/// Inspect the node connection.
	Node {
		#[command(subcommand)]
		command: NodeCommand,
	},

	/// Transfer TRX from the signer to another account.
	Transfer {
		/// Recipient address or account name.
		to: String,

		/// Amount in sun (1 TRX = 1000000 sun).
		amount: u64,
	},
}

// -- Accounts subcommands --

#[derive(Subcommand)]
pub enum AccountsCommand {
	/// Register an account name for an address.
	Add {
		/// Account name.
		name: String,

		/// Base58 address.
		address: String,
	},

	/// Forget an account name.
	Remove {
		/// Account name.
		name: String,
	},

	/// List registered account names.
	List,

	/// Register every `name = "address"` entry of the TOML file given with --file.
	Import,
}

// -- Address subcommands --

#[derive(Subcommand)]
pub enum AddressCommand {
	/// Resolve an address or account name and print both encodings.
	Resolve {
		/// Address or account name.
		value: String,
	},
}

// -- Node subcommands --

#[derive(Subcommand)]
pub enum NodeCommand {
	/// Show the node endpoint and connect latency.
	Status,
}
