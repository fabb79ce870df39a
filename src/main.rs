//! Gridbot - unified CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use gridbot::{
    Bot, BotConfig, CallbackPayload, Dispatcher, GameFlow, MessagingClient, TelegramClient,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Run { config } => run_bot(&config).await,
        Command::Inspect { payload } => inspect(&payload),
        Command::Limits { config } => limits(&config),
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gridbot=debug,gridbot_board=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the polling bot until Ctrl-C
#[instrument(fields(config_path = %config_path.display()))]
async fn run_bot(config_path: &Path) -> Result<()> {
    let config = BotConfig::load(config_path)?;
    let token = config.token()?;

    let client = Arc::new(TelegramClient::new(
        config.api_url(),
        &token,
        config.poll_timeout(),
    )?);
    let flow = Arc::new(GameFlow::new(config.roster(), config.payload_limit()));
    let messaging: Arc<dyn MessagingClient> = client.clone();
    let dispatcher = Dispatcher::standard(messaging, flow);

    info!(
        max_width = config.payload_limit().max_width(),
        "Starting gridbot"
    );
    Bot::new(client, dispatcher, config.poll_timeout(), config.retry_delay())
        .run()
        .await;
    Ok(())
}

/// Print what a callback payload carries
fn inspect(payload: &str) -> Result<()> {
    match CallbackPayload::parse(payload)? {
        CallbackPayload::OccupiedCell => {
            println!("{payload}: inert control (occupied cell or finished game)");
        }
        CallbackPayload::Move { index, board } => {
            println!("move:        cell {index}");
            println!("width:       {}", board.width());
            println!("win length:  {}", board.win_length());
            println!("next to move: {:?}", board.to_move());
            println!("winning:     {}", board.is_winning_stroke(index));
            println!("full:        {}", board.is_full());
            println!();
            println!("{}", board.display());
        }
    }
    Ok(())
}

/// Print the payload ceiling
fn limits(config_path: &Path) -> Result<()> {
    let config = BotConfig::load(config_path)?;
    let limit = config.payload_limit();
    println!("max callback bytes: {}", limit.max_bytes());
    println!("largest board:      {0}x{0}", limit.max_width());
    let strategies: Vec<String> = config.strategies().iter().map(|s| s.to_string()).collect();
    println!("strategies:         {}", strategies.join(", "));
    Ok(())
}
