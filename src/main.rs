use anyhow::Context;
use clap::Parser;
use fuzzygo_core::{logging, startup, ServerConfig};

#[derive(Parser)]
#[command(name = "fuzzygo-server", version, about = "Fuzzy-Go kanban backend")]
struct Cli {
    /// Path to the service-account key file
    #[arg(
        long,
        env = "FUZZYGO_CREDENTIALS",
        default_value = ServerConfig::DEFAULT_CREDENTIALS_FILE
    )]
    credentials: String,

    /// Directory for the local document store
    #[arg(long, env = "FUZZYGO_DATA_DIR", default_value = ServerConfig::DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Port announced in the readiness message
    #[arg(long, env = "FUZZYGO_PORT", default_value_t = ServerConfig::DEFAULT_PORT.to_string())]
    port: String,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<&Cli> for ServerConfig {
    fn from(cli: &Cli) -> Self {
        ServerConfig::from_raw(&cli.credentials, &cli.data_dir, &cli.port)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let config = ServerConfig::from(&cli);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = startup::run(&config, &mut out)
        .await
        .context("failed to write startup status")?;

    tracing::debug!(?report, "startup finished");
    Ok(())
}
