#![allow(clippy::result_large_err)]

use corpus_buddy::{
    api::{self, state::AppState},
    bot::{self, BotData},
    cache::SavedCalculationCache,
    config::{self, database},
    errors::Result,
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load presets and listener settings
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Warm the summary cache
    let cache = SavedCalculationCache::new();
    cache.refresh(&db).await?;

    let presets = Arc::new(app_config.presets);
    let state = AppState::new(db.clone(), cache.clone(), Arc::clone(&presets));

    // 6. Serve the API, plus the bot when a token is configured
    match env::var("DISCORD_BOT_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty())
    {
        Some(token) => {
            let data = BotData::new(db, cache, presets);
            tokio::try_join!(
                api::serve(state, app_config.server.bind_address),
                bot::run_bot(token, data),
            )?;
        }
        None => {
            warn!("DISCORD_BOT_TOKEN not set; running the REST API only.");
            api::serve(state, app_config.server.bind_address).await?;
        }
    }

    Ok(())
}
