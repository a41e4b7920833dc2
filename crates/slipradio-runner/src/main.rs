use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use slipradio_runner::{BridgeServer, RunnerConfig, RunnerError};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Serve a simulated SLIP-radio node over TCP.
#[derive(Parser, Debug)]
#[command(name = "slipradio-sim", version)]
struct Args {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listener address, overrides `server.bind`.
    #[arg(long)]
    bind: Option<String>,
    /// Hardware address, overrides `board.link_address`.
    #[arg(long)]
    link_address: Option<String>,
    /// Status code reported for every send, overrides `loopback.status`.
    #[arg(long)]
    status: Option<u8>,
    /// Transmission count reported for every send.
    #[arg(long)]
    transmissions: Option<u8>,
}

impl Args {
    fn into_config(self) -> Result<RunnerConfig, RunnerError> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::load(path)?,
            None => RunnerConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(address) = self.link_address {
            config.board.link_address = address;
        }
        if let Some(status) = self.status {
            config.loopback.status = status;
        }
        if let Some(transmissions) = self.transmissions {
            config.loopback.transmissions = transmissions;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    slipradio_metrics::describe_metrics();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "simulator stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), RunnerError> {
    let config = args.into_config()?;
    let server = BridgeServer::bind(&config).await?;
    server.serve().await
}
