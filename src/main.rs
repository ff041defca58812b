use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cardstack::config::DeckConfig;

#[derive(Parser)]
#[command(name = "cardstack", about = "Flip through a stack of cards in the terminal.")]
struct Cli {
    /// Deck file (YAML). Falls back to $CARDSTACK_DECK, then the built-in deck.
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Where to write logs (defaults to cardstack.log in the temp dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Gesture travel needed before a move registers
    #[arg(long)]
    tolerance: Option<f64>,

    /// Seed for card throw rotation
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The alternate screen owns stdout, so logs go to a file.
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("cardstack.log"));
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("cannot create log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cardstack=info".parse()?),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let (mut config, deck_path) = DeckConfig::resolve(cli.deck.as_deref())?;
    if let Some(tolerance) = cli.tolerance {
        config.gesture.tolerance = tolerance;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    let source = deck_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".into());
    info!(deck = %source, cards = config.cards.len(), "cardstack starting");

    cardstack::tui::runner::run_tui(config).await
}
