use anyhow::Context;
use clap::Parser;
use music_ontology_server::{start_server, ServerArgs, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = ServerArgs::parse();
    let config = ServerConfig::load(&args).context("failed to load server configuration")?;

    if let Err(e) = start_server(&config).await {
        tracing::error!(error = %e, "server exited with an error");
        return Err(e).context("music ontology server failed");
    }
    Ok(())
}
