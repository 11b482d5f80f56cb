use clap::Parser;
use dotenvy::dotenv;
use scholaris::AppState;
use scholaris::cli::{self, Cli};
use scholaris::scholaris_config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = ClientConfig::from_env();
    if let Err(e) = scholaris_observability::init_logging(&config.logging) {
        eprintln!("Failed to initialise logging: {e}");
    }

    let args = Cli::parse();
    let state = AppState::from_config(config)?;

    let result = cli::run(args, &state).await;
    cli::print_toasts(&state.toasts.drain());
    result
}
