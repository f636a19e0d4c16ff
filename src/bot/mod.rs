//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for CorpusBuddy: calculator slash commands,
//! saved-calculation management, autocomplete handlers, and bot context.

/// Discord command implementations (calculators, saved calculations, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{cache::SavedCalculationCache, config::presets::CalculatorPresets, errors::Error};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for all store operations
    pub database: DatabaseConnection,
    /// Summary cache shared with the API, used for autocomplete
    pub cache: SavedCalculationCache,
    /// Defaults for omitted calculator arguments
    pub presets: Arc<CalculatorPresets>,
}

impl BotData {
    /// Creates a new `BotData` from the shared application state.
    #[must_use]
    pub const fn new(
        database: DatabaseConnection,
        cache: SavedCalculationCache,
        presets: Arc<CalculatorPresets>,
    ) -> Self {
        Self {
            database,
            cache,
            presets,
        }
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// All slash commands the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::sip(),
        commands::stepup(),
        commands::lumpsum(),
        commands::swp(),
        commands::history(),
        commands::show(),
        commands::rename(),
        commands::forget(),
        commands::ping(),
        commands::help(),
    ]
}

/// Connects to Discord and runs the bot until the gateway connection ends.
///
/// # Errors
/// Returns an error if the client cannot be built or the connection fails.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
