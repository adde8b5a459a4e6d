use clap::error::ErrorKind;
use clap::Parser;
use std::process;
use std::time::Duration;

use http_get::client::{ExchangeSummary, HttpClient, TcpConnector};
use http_get::config::{ClientConfig, DEFAULT_BUFFER_SIZE};
use http_get::error::{Error, Result};
use http_get::logging;
use http_get::output::OutputSink;

const USAGE: &str = "usage: client HOSTNAME:PORT/PATH";

/// Fetch a url with one HTTP/1.1 GET and write the raw response to stdout.
#[derive(Debug, Parser)]
#[command(name = "client", version, about, long_about = None)]
struct Cli {
    /// Target as HOSTNAME[:PORT]/PATH, optionally prefixed with http://
    url: String,

    /// Largest number of bytes taken from the socket per read.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Give up connecting after this many seconds.
    #[arg(long, value_name = "SECS", value_parser = parse_secs)]
    connect_timeout: Option<Duration>,

    /// Give up when the server is silent for this many seconds.
    #[arg(long, value_name = "SECS", value_parser = parse_secs)]
    read_timeout: Option<Duration>,

    /// Log more to stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_secs(s: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{}", e))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{}", e))
}

fn run(cli: Cli) -> Result<ExchangeSummary> {
    let config = ClientConfig::default()
        .with_buffer_size(cli.buffer_size)
        .with_connect_timeout(cli.connect_timeout)
        .with_read_timeout(cli.read_timeout);
    tracing::debug!(?config, "loaded config");

    let client = HttpClient::new(TcpConnector::from_config(&config), config);
    client.get(&cli.url, &mut OutputSink::stdout())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let err = Error::UsageError(e.to_string());
            eprintln!("{}", USAGE);
            eprint!("{}", e);
            process::exit(err.exit_code());
        }
    };

    logging::init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        tracing::debug!(error = ?err, "request failed");
        eprintln!("client: {}", err);
        process::exit(err.exit_code());
    }
}
