mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use ec2_inventory::{Ec2Provider, InventoryConfig, build_inventory, output};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // NOTE: stdout carries the inventory JSON only
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = InventoryConfig::from(cli.settings);
    tracing::debug!(?config, "configuration resolved");

    let provider = Ec2Provider::with_endpoint_url(config.endpoint_url.clone());
    let inventory = build_inventory(&config, &provider).await?;

    let rendered = match cli.host.as_deref() {
        Some(host) => output::render_host(&inventory, host)?,
        None => output::render(&inventory)?,
    };
    output::write_document(&mut std::io::stdout().lock(), &rendered)?;

    Ok(())
}
