//! Logging init. Everything goes to stderr; stdout carries only response bytes.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset, chosen by how many `-v` flags were given.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,http_get=debug,client=debug",
        _ => "warn,http_get=trace,client=trace",
    }
}

/// Install a stderr `fmt` subscriber. Later calls are no-ops.
pub fn init_logging(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(verbosity, "logging initialized");
    }
}
