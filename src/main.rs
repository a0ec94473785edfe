use clap::Parser;
use feature_metrics::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    cli::notify::run(cli).await
}
