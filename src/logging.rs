use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber.  `RUST_LOG` wins; otherwise only warnings
/// are shown unless `verbose` asks for this crate's debug output.
///
/// Called once per process, from `router::execute`.
pub fn init(verbose: bool) {
	let fallback = if verbose { "warn,tronctl=debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

	tracing_subscriber::registry()
		.with(fmt::layer().with_target(true).with_writer(std::io::stderr))
		.with(filter)
		.init();
}
