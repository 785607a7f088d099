use anyhow::Result;
use clap::Parser;
use kharcha::cli::Cli;
use kharcha::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose).map_err(anyhow::Error::msg)?;
    cli.run().await
}
