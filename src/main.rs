use clap::Parser;
use miette::Result;
use tracing_subscriber::{fmt, EnvFilter};

use territory::errors::TerritoryError;
use territory::permission::PermissionState;
use territory::{registry, settings, web};

#[derive(Parser, Debug)]
#[command(
    name = "territory",
    version,
    about = "Distributor region permission service"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // load settings
    let settings = settings::Settings::load(&cli.config)?;
    tracing::info!(?settings, "Loaded configuration");

    // the registry is complete before any request is served
    let locations =
        registry::loader::load_locations(&settings.locations.path).map_err(TerritoryError::from)?;
    let state = PermissionState::new(locations);

    web::serve(settings, state).await?;
    Ok(())
}
