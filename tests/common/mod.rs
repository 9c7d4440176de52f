#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Minimal HTTP responder standing in for the release API.
///
/// Serves canned `(status, body)` pairs keyed by request path; unknown
/// paths get a 404.
pub struct FakeApi {
	pub addr: SocketAddr,
	hits: Arc<AtomicUsize>,
}

impl FakeApi {
	pub fn start(routes: Vec<(&str, u16, &str)>) -> Self {
		let routes: HashMap<String, (u16, String)> = routes
			.into_iter()
			.map(|(path, status, body)| (path.to_owned(), (status, body.to_owned())))
			.collect();
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();
		let hits = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&hits);

		thread::spawn(move || {
			for stream in listener.incoming() {
				let Ok(mut stream) = stream else { break };
				counter.fetch_add(1, Ordering::SeqCst);
				let path = read_request_path(&mut stream);
				let (status, body) = routes
					.get(&path)
					.cloned()
					.unwrap_or((404, r#"{"message":"Not Found"}"#.to_owned()));
				let response = format!(
					"HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
					body.len()
				);
				let _ = stream.write_all(response.as_bytes());
				let _ = stream.flush();
			}
		});

		Self { addr, hits }
	}

	/// Connections accepted so far.
	pub fn hits(&self) -> usize {
		self.hits.load(Ordering::SeqCst)
	}

	pub fn base(&self) -> String {
		format!("http://{}", self.addr)
	}
}

fn read_request_path(stream: &mut impl Read) -> String {
	let mut buf = Vec::new();
	let mut chunk = [0u8; 1024];
	while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
		match stream.read(&mut chunk) {
			Ok(0) | Err(_) => break,
			Ok(n) => buf.extend_from_slice(&chunk[..n]),
		}
	}
	let head = String::from_utf8_lossy(&buf);
	head.split_whitespace().nth(1).unwrap_or("/").to_owned()
}

/// A listener that accepts TCP connections and never speaks; enough for
/// the pre-run connection step.
pub fn silent_node() -> TcpListener {
	TcpListener::bind("127.0.0.1:0").unwrap()
}

/// An address nobody listens on.
pub fn dead_node() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	listener.local_addr().unwrap().to_string()
}

/// Run the built binary with an isolated state directory.
pub fn run_cli(home: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_tronctl"))
		.args(args)
		.env("TRONCTL_HOME", home)
		.env_remove("TRONCTL_DEBUG")
		.env_remove("RUST_LOG")
		.current_dir(home)
		.output()
		.expect("failed to run tronctl")
}

pub fn write_config(home: &Path, content: &str) {
	std::fs::write(home.join("config.toml"), content).unwrap();
}

pub fn stderr(out: &Output) -> String {
	String::from_utf8_lossy(&out.stderr).into_owned()
}

pub fn stdout(out: &Output) -> String {
	String::from_utf8_lossy(&out.stdout).into_owned()
}
