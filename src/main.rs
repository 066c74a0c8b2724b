//! prdigest CLI entrypoint for rendering pull request comment digests.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use prdigest::{DigestError, PrDigestConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ignored = writeln!(io::stderr().lock(), "{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DigestError> {
    let config = load_config()?;
    config.validate()?;
    cli::digest::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`DigestError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PrDigestConfig, DigestError> {
    PrDigestConfig::load().map_err(|error| DigestError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr log subscriber filtered by `RUST_LOG`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ignored = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init();
}
