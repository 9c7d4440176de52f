use std::path::Path;
use std::process::Command;

/// Embed the short commit hash as `TRONCTL_COMMIT` for the build stamp.
/// An explicit `TRONCTL_COMMIT` in the environment wins; without git it is empty.
fn main() {
	println!("cargo:rerun-if-env-changed=TRONCTL_COMMIT");
	if let Ok(head) = std::fs::read_to_string(".git/HEAD") {
		println!("cargo:rerun-if-changed=.git/HEAD");
		if let Some(reference) = head.trim().strip_prefix("ref: ") {
			let path = Path::new(".git").join(reference);
			if path.exists() {
				println!("cargo:rerun-if-changed={}", path.display());
			}
		}
	}

	let commit = std::env::var("TRONCTL_COMMIT")
		.ok()
		.filter(|c| !c.is_empty())
		.or_else(git_short_commit)
		.unwrap_or_default();

	println!("cargo:rustc-env=TRONCTL_COMMIT={commit}");
}

fn git_short_commit() -> Option<String> {
	let out = Command::new("git")
		.args(["rev-parse", "--short=8", "HEAD"])
		.output()
		.ok()?;
	if !out.status.success() {
		return None;
	}
	let commit = String::from_utf8(out.stdout).ok()?.trim().to_owned();
	(!commit.is_empty()).then_some(commit)
}
