//! Elasticsearch MCP server over stdio.
//!
//! Configuration comes from `ES_*` environment variables. Logs go to stderr;
//! stdout carries only protocol messages.

use elastic_mcp_server::{ElasticMcpServer, HttpStoreClient, RawConfig};
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = RawConfig::from_env().validate()?;
    info!(
        "Connecting to Elasticsearch at {} ({:?}, schema version {})",
        config.url,
        config.auth,
        config.version.as_str()
    );

    let store = HttpStoreClient::new(&config)?;
    let server = ElasticMcpServer::new(store)?;

    tokio::select! {
        result = server.run_stdio() => {
            result?;
            info!("Input closed, shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }
    Ok(())
}
