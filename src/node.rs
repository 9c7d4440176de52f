use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::{Error, Result};

/// Port appended to node endpoints given without one.
pub const DEFAULT_PORT: u16 = 50051;

/// Append the default port to an endpoint that has none.
pub fn normalize_endpoint(node: &str) -> String {
	if node.contains(':') {
		node.to_owned()
	} else {
		format!("{node}:{DEFAULT_PORT}")
	}
}

/// The single transport to the node for one process run.
///
/// Opened once before the subcommand runs and shut down with
/// [`NodeConnection::close`] afterwards; dropping it also releases the socket.
pub struct NodeConnection {
	endpoint: String,
	stream: TcpStream,
	latency: Duration,
}

impl NodeConnection {
	/// Connect to `endpoint`, giving up after `timeout`.
	pub async fn open(endpoint: &str, timeout: Duration) -> Result<Self> {
		let started = Instant::now();
		let connect = TcpStream::connect(endpoint);
		let stream = match tokio::time::timeout(timeout, connect).await {
			Ok(Ok(stream)) => stream,
			Ok(Err(source)) => {
				return Err(Error::Connection {
					endpoint: endpoint.to_owned(),
					source,
				});
			}
			Err(_) => {
				return Err(Error::Connection {
					endpoint: endpoint.to_owned(),
					source: std::io::Error::new(
						std::io::ErrorKind::TimedOut,
						format!("no response within {}s", timeout.as_secs()),
					),
				});
			}
		};
		let latency = started.elapsed();
		debug!(endpoint, ?latency, "connected to node");

		Ok(Self {
			endpoint: endpoint.to_owned(),
			stream,
			latency,
		})
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Time it took to establish the transport.
	pub fn latency(&self) -> Duration {
		self.latency
	}

	/// Shut the transport down.  Errors here are not actionable.
	pub async fn close(mut self) {
		if let Err(e) = self.stream.shutdown().await {
			debug!(endpoint = %self.endpoint, error = %e, "node connection shutdown failed");
		} else {
			debug!(endpoint = %self.endpoint, "node connection closed");
		}
	}
}
