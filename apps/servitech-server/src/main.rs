use clap::Parser;
use servitech_server::{logging, server, AppConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "servitech-server", version, about = "ServiTech Pro back office server")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides server.bind
    #[arg(long)]
    bind: Option<String>,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
        config.validate()?;
    }

    logging::init(&config.logging)?;
    server::run(config, cli.migrate_only).await
}
