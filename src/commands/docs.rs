use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::CommandFactory;

use crate::cli::Cli;

/// Directory, relative to the working directory, that receives the docs.
pub const DOCS_DIR: &str = "tronctl-docs";

pub fn run() -> Result<()> {
	let dir = std::env::current_dir()?.join(DOCS_DIR);
	let written = generate(&dir)?;
	println!("Wrote {} page(s) to {}", written.len(), dir.display());
	Ok(())
}

/// Write one Markdown page per command into `dir`, returning the paths.
pub fn generate(dir: &Path) -> Result<Vec<PathBuf>> {
	create_private_dir(dir)?;

	let mut root = Cli::command();
	root.build();

	let mut written = Vec::new();
	write_tree(&root, &[], dir, &mut written)?;
	Ok(written)
}

fn write_tree(
	cmd: &clap::Command,
	parents: &[&str],
	dir: &Path,
	written: &mut Vec<PathBuf>,
) -> Result<()> {
	let mut path: Vec<&str> = parents.to_vec();
	path.push(cmd.get_name());

	let path_buf = dir.join(format!("{}.md", path.join("_")));
	std::fs::write(&path_buf, render_page(cmd, &path))
		.with_context(|| format!("writing {}", path_buf.display()))?;
	written.push(path_buf);

	for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
		write_tree(sub, &path, dir, written)?;
	}
	Ok(())
}

fn render_page(cmd: &clap::Command, path: &[&str]) -> String {
	let full_name = path.join(" ");
	let mut page = String::new();

	let _ = writeln!(page, "## {full_name}\n");
	if let Some(about) = cmd.get_about() {
		let _ = writeln!(page, "{about}\n");
	}
	let _ = writeln!(page, "### Synopsis\n");
	let _ = writeln!(page, "```\n{}\n```\n", cmd.clone().render_long_help().to_string().trim_end());

	let parent = (path.len() > 1).then(|| &path[..path.len() - 1]);
	let children: Vec<_> = cmd
		.get_subcommands()
		.filter(|s| s.get_name() != "help")
		.collect();

	if parent.is_some() || !children.is_empty() {
		let _ = writeln!(page, "### SEE ALSO\n");
		if let Some(parent) = parent {
			let _ = writeln!(page, "* [{}]({}.md)", parent.join(" "), parent.join("_"));
		}
		for child in children {
			let _ = writeln!(
				page,
				"* [{full_name} {}]({}_{}.md)\t - {}",
				child.get_name(),
				path.join("_"),
				child.get_name(),
				child.get_about().map(|a| a.to_string()).unwrap_or_default()
			);
		}
	}
	page
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
	use std::os::unix::fs::DirBuilderExt;
	std::fs::DirBuilder::new()
		.recursive(true)
		.mode(0o700)
		.create(dir)
		.with_context(|| format!("creating {}", dir.display()))
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
	std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}
