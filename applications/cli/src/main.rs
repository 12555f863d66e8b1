//! Encore - playlist editor and preferences from the terminal

use clap::Parser;
use encore_cli::{App, Cli, EncoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = EncoreConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.database {
        config.storage.database_url = url;
        config.validate()?;
    }

    // Initialize tracing (stderr, so command output stays clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Using database {}", config.storage.database_url);

    let app = App::open(&config).await?;
    let result = app.execute(cli.command);

    // Persist whatever changed before exiting, even if the command failed
    app.flush().await;

    println!("{}", result?);
    Ok(())
}
