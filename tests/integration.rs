//! End-to-end runs of the `tronctl` binary.
//!
//! The node is a local TCP listener and the state directory a temp dir,
//! so nothing here touches the network.

mod common;

use common::{dead_node, run_cli, silent_node, stderr, stdout, write_config};

const USDT_CONTRACT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

fn home() -> tempfile::TempDir {
	let dir = tempfile::tempdir().unwrap();
	write_config(
		dir.path(),
		"[node]\nconnect_timeout_secs = 5\n\n[update]\nenabled = false\n",
	);
	dir
}

#[test]
fn unreachable_node_exits_with_connection_error() {
	let home = home();
	let node = dead_node();

	let out = run_cli(home.path(), &["--node", &node, "node", "status"]);

	assert_eq!(out.status.code(), Some(1));
	let err = stderr(&out);
	assert!(err.contains("could not connect to node"), "{err}");
	assert!(err.contains(&node), "{err}");
	assert!(err.contains("commit: v"), "{err}");
	assert!(err.contains("try adding a `--help` flag"), "{err}");
}

#[test]
fn unknown_signer_exits_naming_the_input() {
	let home = home();
	let listener = silent_node();
	let node = listener.local_addr().unwrap().to_string();

	let out = run_cli(
		home.path(),
		&["--node", &node, "--signer", "not-an-address-or-name", "node", "status"],
	);

	assert_eq!(out.status.code(), Some(1));
	let err = stderr(&out);
	assert!(err.contains("invalid address/invalid account name: not-an-address-or-name"), "{err}");
}

#[test]
fn account_name_works_as_signer() {
	let home = home();
	let listener = silent_node();
	let node = listener.local_addr().unwrap().to_string();

	let out = run_cli(home.path(), &["--node", &node, "accounts", "add", "alice", USDT_CONTRACT]);
	assert!(out.status.success(), "{}", stderr(&out));

	let out = run_cli(home.path(), &["--node", &node, "--signer", "alice", "node", "status"]);
	assert!(out.status.success(), "{}", stderr(&out));
	let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
	assert_eq!(json["signer"], USDT_CONTRACT);
	assert_eq!(json["node"], node.as_str());
	assert_eq!(json["connected"], true);
}

#[test]
fn resolve_prints_compact_json_without_pretty() {
	let home = home();
	let listener = silent_node();
	let node = listener.local_addr().unwrap().to_string();

	let out = run_cli(
		home.path(),
		&["--node", &node, "--no-pretty", "address", "resolve", USDT_CONTRACT],
	);
	assert!(out.status.success(), "{}", stderr(&out));

	let text = stdout(&out);
	assert_eq!(text.trim().lines().count(), 1, "{text}");
	let json: serde_json::Value = serde_json::from_str(&text).unwrap();
	assert_eq!(json["base58"], USDT_CONTRACT);
	assert!(json["hex"].as_str().unwrap().starts_with("41"));
}

#[test]
fn import_reads_the_file_flag() {
	let home = home();
	let listener = silent_node();
	let node = listener.local_addr().unwrap().to_string();
	let file = home.path().join("import.toml");
	std::fs::write(&file, format!("usdt = \"{USDT_CONTRACT}\"\n")).unwrap();

	let out = run_cli(
		home.path(),
		&["--node", &node, "--file", file.to_str().unwrap(), "accounts", "import"],
	);
	assert!(out.status.success(), "{}", stderr(&out));

	let out = run_cli(home.path(), &["--node", &node, "accounts", "list"]);
	assert!(stdout(&out).contains("usdt"), "{}", stdout(&out));
	assert!(stdout(&out).contains(USDT_CONTRACT));
}

#[test]
fn dry_run_transfer_prints_receipt() {
	let home = home();
	let listener = silent_node();
	let node = listener.local_addr().unwrap().to_string();

	let out = run_cli(
		home.path(),
		&[
			"--node", &node, "--signer", USDT_CONTRACT, "--dry-run", "--timeout", "0",
			"transfer", USDT_CONTRACT, "1000000",
		],
	);
	assert!(out.status.success(), "{}", stderr(&out));

	let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
	assert_eq!(json["broadcast"], false);
	assert_eq!(json["behavior"]["dry_run"], true);
	assert_eq!(json["behavior"]["confirmation_wait_time"], 0);
	assert_eq!(json["transaction"]["amount"], 1_000_000);
	assert_eq!(json["txid"].as_str().unwrap().len(), 64);
}

#[test]
fn transfer_without_dry_run_fails() {
	let home = home();
	let listener = silent_node();
	let node = listener.local_addr().unwrap().to_string();

	let out = run_cli(
		home.path(),
		&["--node", &node, "--signer", USDT_CONTRACT, "--ledger", "transfer", USDT_CONTRACT, "5"],
	);
	assert_eq!(out.status.code(), Some(1));
	assert!(stderr(&out).contains("ledger signing backend"), "{}", stderr(&out));
}

#[test]
fn docs_are_written_to_working_directory() {
	let home = home();
	let listener = silent_node();
	let node = listener.local_addr().unwrap().to_string();

	let out = run_cli(home.path(), &["--node", &node, "docs"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(home.path().join("tronctl-docs").join("tronctl.md").exists());
}

#[test]
fn help_and_bare_invocation_succeed_without_a_node() {
	let home = home();

	let out = run_cli(home.path(), &["--help"]);
	assert!(out.status.success());
	assert!(stdout(&out).contains("--signer"));

	let out = run_cli(home.path(), &[]);
	assert!(out.status.success());
	assert!(stdout(&out).contains("Tron"));
}

#[test]
fn bad_flags_are_reported_like_any_failure() {
	let home = home();

	let out = run_cli(home.path(), &["--bogus"]);
	assert_eq!(out.status.code(), Some(1));
	let err = stderr(&out);
	assert!(err.contains("commit: v"), "{err}");
	assert!(err.contains("--bogus"), "{err}");
	assert!(err.contains("try adding a `--help` flag"), "{err}");
}

#[test]
fn help_ignores_a_broken_config_file() {
	let home = tempfile::tempdir().unwrap();
	write_config(home.path(), "[node\n");

	let out = run_cli(home.path(), &["--help"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("--signer"));

	let out = run_cli(home.path(), &["--version"]);
	assert!(out.status.success(), "{}", stderr(&out));

	let out = run_cli(home.path(), &[]);
	assert!(out.status.success(), "{}", stderr(&out));
}

#[test]
fn broken_config_fails_without_release_check() {
	let home = tempfile::tempdir().unwrap();
	write_config(home.path(), "[node\n");
	let node = dead_node();

	let out = run_cli(home.path(), &["--node", &node, "node", "status"]);
	assert_eq!(out.status.code(), Some(1));
	let err = stderr(&out);
	assert!(err.contains("TOML parse error"), "{err}");
	assert!(err.contains("try adding a `--help` flag"), "{err}");
	assert!(!err.contains("outdated"), "{err}");
	assert!(!err.contains("could not connect"), "{err}");
}
